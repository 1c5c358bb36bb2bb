use crate::{
    data::{Draft, Entity, FieldId, FieldKind, FormMode},
    error::{AdminResult, UnknownFieldSnafu},
    submission::{SubmitOutcome, SubmitPhase},
    validation::{ValidationErrors, validate},
};
use snafu::OptionExt;

pub type FieldOf<E> = <<E as Entity>::Draft as Draft>::Field;

///What gets handed to the backend once a draft passes validation.
#[derive(Debug, Clone)]
pub struct Submission<D> {
    pub mode: FormMode,
    pub draft: D,
}

///One add/edit dialog. Closing always throws the draft away.
#[derive(Debug, Clone)]
pub struct FormState<E: Entity> {
    mode: FormMode,
    draft: E::Draft,
    errors: ValidationErrors<FieldOf<E>>,
    open: bool,
    phase: SubmitPhase,
    notice: Option<String>,
}

impl<E: Entity> Default for FormState<E> {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            draft: <E::Draft>::default(),
            errors: ValidationErrors::default(),
            open: false,
            phase: SubmitPhase::Idle,
            notice: None,
        }
    }
}

impl<E: Entity> FormState<E> {
    pub fn open_add() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    pub fn open_edit(record: &E) -> Self {
        Self {
            mode: FormMode::Edit {
                id: record.id().clone(),
            },
            draft: record.to_draft(),
            open: true,
            ..Self::default()
        }
    }

    ///Rebuilds a dialog that was already open in the browser
    pub fn resume(mode: FormMode) -> Self {
        Self {
            mode,
            open: true,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn close(&mut self) {
        self.reset();
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub const fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: E::Draft) {
        self.draft = draft;
    }

    pub const fn errors(&self) -> &ValidationErrors<FieldOf<E>> {
        &self.errors
    }

    pub const fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn on_text(&mut self, field: FieldOf<E>, value: String) {
        self.draft.set_text(field, value, &self.mode);
    }

    pub fn on_choice(&mut self, field: FieldOf<E>, raw: &str) {
        self.draft.set_choice(field, raw);
    }

    pub fn on_toggle(&mut self, field: FieldOf<E>, on: bool) {
        self.draft.set_flag(field, on);
    }

    ///Routes a raw form value to the handler for that field's kind.
    pub fn apply(&mut self, id: &str, raw: String) -> AdminResult<FieldOf<E>> {
        let field = <FieldOf<E>>::lookup(id).context(UnknownFieldSnafu {
            entity: E::NOUN,
            field: id,
        })?;

        match <E::Draft as Draft>::spec(field).map(|spec| spec.kind) {
            Some(FieldKind::Choice(_)) => self.on_choice(field, &raw),
            Some(FieldKind::Toggle { .. }) => {
                self.on_toggle(field, matches!(raw.as_str(), "true" | "on"));
            }
            _ => self.on_text(field, raw),
        }

        Ok(field)
    }

    pub fn begin_submit(&mut self) -> Result<Submission<E::Draft>, SubmitOutcome> {
        if self.phase == SubmitPhase::Submitting {
            return Err(SubmitOutcome::Busy);
        }

        self.phase = SubmitPhase::Validating;
        let errors = validate(&self.draft, &self.mode);
        if !errors.is_empty() {
            debug!(
                noun = E::NOUN,
                fields = ?errors.iter().map(|(field, _)| field.id()).collect::<Vec<_>>(),
                "Rejected draft"
            );
            self.errors = errors;
            self.phase = SubmitPhase::Idle;
            return Err(SubmitOutcome::Rejected);
        }

        self.errors = ValidationErrors::default();
        self.notice = None;
        self.phase = SubmitPhase::Submitting;
        Ok(Submission {
            mode: self.mode.clone(),
            draft: self.draft.clone(),
        })
    }

    pub fn finish(&mut self, accepted: bool) -> SubmitOutcome {
        self.phase = SubmitPhase::Idle;
        if accepted {
            self.close();
            SubmitOutcome::Succeeded
        } else {
            self.notice = Some(format!(
                "Unable to save this {}. Please check the details and try again.",
                E::NOUN
            ));
            SubmitOutcome::Failed
        }
    }
}
