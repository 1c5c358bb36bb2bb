use crate::{
    api::RecordApi,
    data::{Entity, FormMode, RecordId},
    form::FormState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    ///validation failed, nothing was sent
    Rejected,
    Succeeded,
    ///the backend said no, the draft is kept
    Failed,
    ///a request for this dialog is already in flight
    Busy,
}

impl SubmitOutcome {
    ///whether the list behind the dialog needs refetching
    pub const fn changed_records(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

pub async fn submit<E: Entity>(form: &mut FormState<E>, api: &dyn RecordApi<E>) -> SubmitOutcome {
    let submission = match form.begin_submit() {
        Ok(submission) => submission,
        Err(outcome) => return outcome,
    };

    let accepted = match &submission.mode {
        FormMode::Create => api.create(&submission.draft).await,
        FormMode::Edit { id } => api.update(id, &submission.draft).await,
    };

    let outcome = form.finish(accepted);
    info!(noun = E::NOUN, ?outcome, "Submitted form");
    outcome
}

pub async fn delete<E: Entity>(api: &dyn RecordApi<E>, id: &RecordId) -> bool {
    let deleted = api.delete(id).await;
    if deleted {
        info!(noun = E::NOUN, %id, "Deleted record");
    }
    deleted
}
