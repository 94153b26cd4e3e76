use std::time::Duration;

use litreview_core::{Effect, Msg, ReviewFailure};
use litreview_engine::{
    export_verbatim, Clipboard, CredentialStore, EngineEvent, EngineHandle, SubmitError,
    TransportError,
};
use litreview_logging::{review_error, review_info, review_warn};

/// Executes the effects emitted by `update` against the engine and the local
/// capabilities. Effects that finish synchronously hand back their follow-up
/// messages; review results arrive later through [`EffectRunner::next_msg`].
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    store: Box<dyn CredentialStore>,
    clipboard: Box<dyn Clipboard>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        store: Box<dyn CredentialStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            engine,
            store,
            clipboard,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::PersistCredential(credential) => {
                    if let Err(err) = self.store.save(&credential) {
                        review_error!("Failed to persist credential: {}", err);
                    }
                }
                Effect::SubmitReview(request) => {
                    review_info!(
                        "Submitting review: {} file(s), language {}",
                        request.files.len(),
                        request.output_language
                    );
                    match self.engine.submit(request) {
                        Ok(()) => {}
                        // The outstanding submission will still report back.
                        Err(SubmitError::AlreadyInFlight) => {
                            review_warn!("Submission dropped: one is already running");
                        }
                        Err(err) => {
                            review_error!("Submission could not start: {}", err);
                            follow_ups.push(Msg::ReviewFinished(Err(ReviewFailure::default())));
                        }
                    }
                }
                Effect::CopyToClipboard(text) => {
                    let outcome = export_verbatim(&text, self.clipboard.as_mut())
                        .map_err(|err| err.to_string());
                    follow_ups.push(Msg::CopyFinished(outcome));
                }
            }
        }
        follow_ups
    }

    /// Waits up to `timeout` for the next engine result that the form cares about.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).and_then(map_event)
    }

    /// An already queued engine result, without waiting.
    pub fn try_next_msg(&self) -> Option<Msg> {
        std::iter::from_fn(|| self.engine.try_recv()).find_map(map_event)
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::ReviewCompleted { result } => Some(Msg::ReviewFinished(
            result
                .map(|response| response.literature_review)
                .map_err(map_transport_error),
        )),
        EngineEvent::PingCompleted { .. } => None,
    }
}

fn map_transport_error(err: TransportError) -> ReviewFailure {
    ReviewFailure { detail: err.detail }
}
