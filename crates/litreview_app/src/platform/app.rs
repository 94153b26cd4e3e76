use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use litreview_core::{
    update, Credential, FileCandidate, FormState, MessageKind, Msg, OutputLanguage, ReviewFailure,
};
use litreview_engine::{
    inspect_local_file, AtomicFileWriter, CredentialStore, EngineEvent, EngineHandle,
    FileCredentialStore, MemoryCredentialStore, Osc52Clipboard,
};
use litreview_logging::{review_debug, review_info, review_warn};
use log::LevelFilter;

use super::cli::Cli;
use super::effects::EffectRunner;
use super::render::{render_message, render_review, render_summary};
use super::settings::{config_dir, load_settings};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Values collected from the command line, applied to the form in order.
struct FormInput {
    api_key: Option<String>,
    topic: Option<String>,
    language: OutputLanguage,
    files: Vec<FileCandidate>,
}

/// One form session: the state plus everything its effects touch.
struct Session {
    state: FormState,
    runner: EffectRunner,
}

impl Session {
    fn new(credential: Credential, runner: EffectRunner) -> Self {
        Self {
            state: FormState::with_credential(credential),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut pending = vec![msg];
        while let Some(msg) = pending.pop() {
            if !matches!(msg, Msg::CredentialChanged(_)) {
                review_debug!("dispatch {:?}", msg);
            }
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            let mut follow_ups = self.runner.run(effects);
            follow_ups.reverse();
            pending.extend(follow_ups);
        }
    }

    fn print_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            for line in render_summary(&self.state.view()) {
                eprintln!("{line}");
            }
        }
    }

    fn holds_error(&self) -> bool {
        self.state
            .message()
            .is_some_and(|message| message.kind == MessageKind::Error)
    }

    /// Fills the form and submits it. A rejected file batch ends the session
    /// on its own error, without a submission.
    fn submit_form(&mut self, input: FormInput) {
        if let Some(key) = input.api_key {
            self.dispatch(Msg::CredentialChanged(key));
        }
        if let Some(topic) = input.topic {
            self.dispatch(Msg::TopicChanged(topic));
        }
        self.dispatch(Msg::LanguageSelected(input.language));

        if !input.files.is_empty() {
            self.dispatch(Msg::FilesDropped(input.files));
            for name in self.state.skipped_files() {
                review_warn!("Skipping {}: not a PDF", name);
            }
            if self.holds_error() {
                self.print_if_dirty();
                return;
            }
        }

        self.print_if_dirty();
        self.dispatch(Msg::SubmitClicked);
        self.print_if_dirty();
        self.wait_for_review();
    }

    /// Blocks until the outstanding submission has reported back.
    fn wait_for_review(&mut self) {
        while self.state.is_loading() {
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
                continue;
            }
            // The flag clears only after the result is queued, so an idle
            // engine with an empty queue has lost the submission.
            if !self.runner.engine().is_in_flight() {
                let msg = self.runner.try_next_msg().unwrap_or_else(|| {
                    review_warn!("Submission ended without a result");
                    Msg::ReviewFinished(Err(ReviewFailure::default()))
                });
                self.dispatch(msg);
            }
        }
    }
}

/// Runs one CLI session. `Ok(false)` means the form ended on an error message.
pub fn run_app(cli: Cli) -> Result<bool> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    litreview_logging::initialize(cli.log, level);

    let dir = config_dir(cli.config_dir.as_deref());
    let settings = load_settings(&dir);
    let client_settings = settings.client_settings(cli.endpoint.as_deref());
    review_info!("Using endpoint {}", client_settings.base_url);

    let engine = EngineHandle::new(client_settings.clone())
        .context("failed to start the request engine")?;

    if cli.check {
        let wait = client_settings.connect_timeout + client_settings.request_timeout;
        return check_service(&engine, wait);
    }

    let store: Box<dyn CredentialStore> = if cli.no_persist {
        Box::new(MemoryCredentialStore::new())
    } else {
        Box::new(FileCredentialStore::new(dir.clone()))
    };
    let credential = store.load();
    let runner = EffectRunner::new(engine, store, Box::new(Osc52Clipboard::stdout()));
    let mut session = Session::new(credential, runner);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        files.push(
            inspect_local_file(path).with_context(|| format!("cannot read {}", path.display()))?,
        );
    }
    session.submit_form(FormInput {
        api_key: cli.api_key,
        topic: cli.topic,
        language: cli.language.unwrap_or_else(|| settings.language()),
        files,
    });

    let view = session.state.view();
    if session.state.result_text().is_some() {
        println!("{}", render_review(&view));
    }
    if let Some(message) = view.message.as_ref() {
        eprintln!("{}", render_message(message));
    }

    if let Some(review) = session.state.result_text() {
        if let Some(output) = cli.output.as_deref() {
            write_output(output, review)?;
        }
        if cli.copy {
            session.dispatch(Msg::CopyClicked);
            if let Some(message) = session.state.message() {
                eprintln!("{}", render_message(message));
            }
        }
    }

    Ok(session
        .state
        .message()
        .map_or(true, |message| message.kind == MessageKind::Success))
}

fn check_service(engine: &EngineHandle, wait: Duration) -> Result<bool> {
    engine
        .ping()
        .map_err(|err| anyhow!("cannot reach the engine: {err}"))?;
    match engine.recv_timeout(wait) {
        Some(EngineEvent::PingCompleted { result: Ok(banner) }) => {
            println!("Service is up: {}", banner.message);
            Ok(true)
        }
        Some(EngineEvent::PingCompleted { result: Err(err) }) => {
            eprintln!("error: service check failed: {err}");
            Ok(false)
        }
        Some(other) => Err(anyhow!("unexpected engine event: {other:?}")),
        None => Err(anyhow!("no answer from the service within {wait:?}")),
    }
}

/// Writes the review exactly as received, replacing any existing file atomically.
fn write_output(path: &Path, review: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("no current directory")?,
    };
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("invalid output path {}", path.display()))?;
    let written = AtomicFileWriter::new(dir)
        .write(filename, review)
        .with_context(|| format!("failed to write {}", path.display()))?;
    review_info!("Wrote review to {:?}", written);
    Ok(())
}
