//! Wizard state and the pure reducer
//!
//! [`reduce`] is total: every action yields a state. Edits that address a
//! missing entity and tags the wizard does not know leave the state as it was.

use devfile_model::{create_initial_document, Document, ValidationErrors};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::entity;
use crate::error::EditError;
use crate::step::{Step, StepProgress};

/// One immutable snapshot of the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(flatten)]
    pub progress: StepProgress,
    pub document: Document,
    #[serde(default)]
    pub validation_errors: ValidationErrors,
}

impl WizardState {
    /// First step, nothing completed, empty document
    #[must_use]
    pub fn initial() -> Self {
        Self {
            progress: StepProgress::new(),
            document: create_initial_document(),
            validation_errors: ValidationErrors::new(),
        }
    }

    /// Step the user is on
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> Step {
        self.progress.current_step
    }

    fn with_progress(&self, progress: StepProgress) -> Self {
        Self {
            progress,
            ..self.clone()
        }
    }

    fn with_document(&self, document: Document) -> Self {
        Self {
            document,
            ..self.clone()
        }
    }
}

/// Compute the state following `action`
#[must_use]
pub fn reduce(state: &WizardState, action: Action) -> WizardState {
    let doc = &state.document;
    match action {
        Action::NextStep => state.with_progress(state.progress.next()),
        Action::PrevStep => state.with_progress(state.progress.prev()),
        Action::GotoStep(step) => state.with_progress(state.progress.goto(step)),
        Action::MarkStepCompleted(step) => {
            state.with_progress(state.progress.mark_completed(step))
        }

        Action::UpdateMetadata(patch) => state.with_document(Document {
            metadata: doc.metadata.clone().merge(patch),
            ..doc.clone()
        }),

        Action::AddProject(project) => state.with_document(Document {
            projects: entity::add(&doc.projects, project),
            ..doc.clone()
        }),
        Action::RemoveProject(index) => edit(
            state,
            "project",
            entity::remove(&doc.projects, index),
            |projects| Document { projects, ..doc.clone() },
        ),
        Action::UpdateProject { index, patch } => edit(
            state,
            "project",
            entity::update(&doc.projects, index, patch),
            |projects| Document { projects, ..doc.clone() },
        ),

        Action::AddComponent(component) => state.with_document(Document {
            components: entity::add(&doc.components, component),
            ..doc.clone()
        }),
        Action::RemoveComponent(index) => edit(
            state,
            "component",
            entity::remove(&doc.components, index),
            |components| Document { components, ..doc.clone() },
        ),
        Action::UpdateComponent { index, patch } => edit(
            state,
            "component",
            entity::update(&doc.components, index, patch),
            |components| Document { components, ..doc.clone() },
        ),

        Action::AddCommand(command) => state.with_document(Document {
            commands: entity::add(&doc.commands, command),
            ..doc.clone()
        }),
        Action::RemoveCommand(index) => edit(
            state,
            "command",
            entity::remove(&doc.commands, index),
            |commands| Document { commands, ..doc.clone() },
        ),
        Action::UpdateCommand { index, patch } => edit(
            state,
            "command",
            entity::update(&doc.commands, index, patch),
            |commands| Document { commands, ..doc.clone() },
        ),

        Action::UpdateEvents(patch) => state.with_document(Document {
            events: doc.events.clone().merge(patch),
            ..doc.clone()
        }),
        Action::UpdateVariables(variables) => state.with_document(Document {
            variables: variables.union(doc.variables.clone()),
            ..doc.clone()
        }),
        Action::SetVariables(variables) => state.with_document(Document {
            variables,
            ..doc.clone()
        }),

        Action::SetValidationErrors(validation_errors) => WizardState {
            validation_errors,
            ..state.clone()
        },
        Action::ResetWizard => WizardState::initial(),

        Action::Unrecognized(tag) => {
            tracing::debug!(%tag, "ignoring unrecognized action");
            state.clone()
        }
    }
}

/// Apply a positional edit, or keep `state` when the index is out of range
fn edit<E: Clone>(
    state: &WizardState,
    target: &'static str,
    result: Result<Vector<E>, EditError>,
    rebuild: impl FnOnce(Vector<E>) -> Document,
) -> WizardState {
    match result {
        Ok(collection) => state.with_document(rebuild(collection)),
        Err(error) => {
            tracing::debug!(target_entity = target, %error, "ignoring edit");
            state.clone()
        }
    }
}
