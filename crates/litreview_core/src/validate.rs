use crate::{text, FormState};

/// First precondition a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("credential is missing")]
    MissingCredential,
    #[error("research topic is missing")]
    MissingTopic,
    #[error("no files selected")]
    MissingFiles,
}

impl ValidationError {
    pub fn user_message(self) -> &'static str {
        match self {
            ValidationError::MissingCredential => text::MISSING_CREDENTIAL,
            ValidationError::MissingTopic => text::MISSING_TOPIC,
            ValidationError::MissingFiles => text::MISSING_FILES,
        }
    }
}

/// Checks submission preconditions in a fixed order and stops at the first
/// failure: credential, then topic, then files.
pub fn validate(state: &FormState) -> Result<(), ValidationError> {
    if state.credential().is_blank() {
        return Err(ValidationError::MissingCredential);
    }
    if state.research_topic().trim().is_empty() {
        return Err(ValidationError::MissingTopic);
    }
    if state.files().is_empty() {
        return Err(ValidationError::MissingFiles);
    }
    Ok(())
}

/// Whether a submit control should be enabled. Rendering hint only.
pub fn can_submit(state: &FormState) -> bool {
    !state.is_loading() && validate(state).is_ok()
}
