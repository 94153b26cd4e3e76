use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use litreview_core::ReviewRequest;
use litreview_logging::{review_info, review_warn};

use crate::{
    ClientSettings, EngineEvent, InFlightGuard, ReqwestReviewClient, ReviewClient,
    ReviewOrchestrator, SubmitError,
};

enum EngineCommand {
    Submit {
        request: ReviewRequest,
        guard: InFlightGuard,
    },
    Ping,
}

/// Runs the orchestrator on a background tokio runtime and reports results
/// as [`EngineEvent`]s.
pub struct EngineHandle {
    orchestrator: ReviewOrchestrator,
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> std::io::Result<Self> {
        Self::with_client(Arc::new(ReqwestReviewClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn ReviewClient>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let orchestrator = ReviewOrchestrator::new(client);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let worker = orchestrator.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let orchestrator = worker.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&orchestrator, command, event_tx).await;
                });
            }
        });

        Ok(Self {
            orchestrator,
            cmd_tx,
            event_rx,
        })
    }

    /// Starts a submission, or refuses synchronously if one is running.
    pub fn submit(&self, request: ReviewRequest) -> Result<(), SubmitError> {
        let guard = self.orchestrator.begin()?;
        self.cmd_tx
            .send(EngineCommand::Submit { request, guard })
            // The returned command still owns the guard; dropping it releases the flag.
            .map_err(|_| SubmitError::EngineStopped)
    }

    pub fn ping(&self) -> Result<(), SubmitError> {
        self.cmd_tx
            .send(EngineCommand::Ping)
            .map_err(|_| SubmitError::EngineStopped)
    }

    pub fn is_in_flight(&self) -> bool {
        self.orchestrator.is_in_flight()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    orchestrator: &ReviewOrchestrator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    // The claim outlives the send below, so the flag clears last.
    let (event, claim) = match command {
        EngineCommand::Submit { request, guard } => {
            let result = orchestrator.run(&guard, &request).await;
            match &result {
                Ok(response) => review_info!(
                    "review received: {} bytes",
                    response.literature_review.len()
                ),
                Err(err) => review_warn!("review failed: {}", err),
            }
            (EngineEvent::ReviewCompleted { result }, Some(guard))
        }
        EngineCommand::Ping => (
            EngineEvent::PingCompleted {
                result: orchestrator.client().ping().await,
            },
            None,
        ),
    };

    // The receiver is gone once the session has ended; nothing is left to update.
    if event_tx.send(event).is_err() {
        review_warn!("session ended before the engine finished; result discarded");
    }
    drop(claim);
}
