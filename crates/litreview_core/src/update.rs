use crate::{
    text, validate, Credential, Effect, FormState, Message, Msg, ReviewFailure, ReviewRequest,
    Status,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::CredentialChanged(value) => {
            let credential = Credential::new(value);
            if *state.credential() == credential {
                return (state, Vec::new());
            }
            state.set_credential(credential.clone());
            // A cleared field must not wipe the stored key.
            if credential.is_empty() {
                Vec::new()
            } else {
                vec![Effect::PersistCredential(credential)]
            }
        }
        Msg::TopicChanged(topic) => {
            state.set_research_topic(topic);
            Vec::new()
        }
        Msg::LanguageSelected(language) => {
            state.set_output_language(language);
            Vec::new()
        }
        Msg::FilesDropped(candidates) => {
            match state.files_mut().add_files(candidates) {
                Ok(added) => {
                    if !added.added.is_empty() {
                        state.mark_dirty();
                    }
                    state.set_skipped_files(added.skipped);
                    state.clear_error();
                }
                Err(err) => {
                    state.set_skipped_files(Vec::new());
                    state.set_message(Message::error(err.user_message()));
                }
            }
            Vec::new()
        }
        Msg::FileRemoved(id) => {
            if state.files_mut().remove_file(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => begin_submission(&mut state),
        Msg::ReviewFinished(result) => {
            finish_submission(&mut state, result);
            Vec::new()
        }
        Msg::CopyClicked => match state.result_text() {
            Some(review) => vec![Effect::CopyToClipboard(review.to_owned())],
            None => Vec::new(),
        },
        Msg::CopyFinished(result) => {
            let message = match result {
                Ok(()) => Message::success(text::COPY_SUCCEEDED),
                Err(_) => Message::error(text::COPY_FAILED),
            };
            state.set_message(message);
            Vec::new()
        }
    };

    (state, effects)
}

fn begin_submission(state: &mut FormState) -> Vec<Effect> {
    if state.is_loading() {
        return Vec::new();
    }
    if let Err(err) = validate(state) {
        state.set_message(Message::error(err.user_message()));
        return Vec::new();
    }

    state.clear_message();
    state.set_status(Status::Loading);
    let request = ReviewRequest {
        research_topic: state.research_topic().to_owned(),
        output_language: state.output_language(),
        credential: state.credential().clone(),
        files: state.files().files().to_vec(),
    };
    vec![Effect::SubmitReview(request)]
}

fn finish_submission(state: &mut FormState, result: Result<String, ReviewFailure>) {
    // Nothing was outstanding; a stray completion must not touch the form.
    if !state.is_loading() {
        return;
    }
    match result {
        Ok(review) => {
            state.set_result_text(review);
            state.set_message(Message::success(text::REVIEW_SUCCEEDED));
        }
        Err(failure) => {
            state.set_message(Message::error(failure.message_text()));
        }
    }
    state.set_status(Status::Idle);
}
