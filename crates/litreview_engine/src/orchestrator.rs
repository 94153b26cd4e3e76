use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use litreview_core::ReviewRequest;
use litreview_logging::{review_debug, review_warn};

use crate::{ReviewClient, ReviewResponse, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("engine has stopped")]
    EngineStopped,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Owns the single-flight flag for review submissions.
///
/// At most one request is outstanding at a time, whatever the front end does.
#[derive(Clone)]
pub struct ReviewOrchestrator {
    client: Arc<dyn ReviewClient>,
    in_flight: Arc<AtomicBool>,
}

impl ReviewOrchestrator {
    pub fn new(client: Arc<dyn ReviewClient>) -> Self {
        Self {
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the flag, or refuses if a submission is already running.
    pub fn begin(&self) -> Result<InFlightGuard, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                review_warn!("refusing submission: another one is in flight");
                SubmitError::AlreadyInFlight
            })?;
        review_debug!("submission flag claimed");
        Ok(InFlightGuard {
            flag: self.in_flight.clone(),
        })
    }

    /// Sends `request` under an already claimed flag. The caller keeps the
    /// guard until the outcome has been delivered, so the flag stays set
    /// until then.
    pub async fn run(
        &self,
        _claim: &InFlightGuard,
        request: &ReviewRequest,
    ) -> Result<ReviewResponse, TransportError> {
        self.client.generate(request).await
    }

    pub async fn submit(&self, request: &ReviewRequest) -> Result<ReviewResponse, SubmitError> {
        let guard = self.begin()?;
        let result = self.run(&guard, request).await;
        drop(guard);
        Ok(result?)
    }

    pub fn client(&self) -> &Arc<dyn ReviewClient> {
        &self.client
    }
}

/// Releases the single-flight flag on drop.
#[must_use = "dropping the guard releases the submission flag"]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        review_debug!("submission flag released");
    }
}
