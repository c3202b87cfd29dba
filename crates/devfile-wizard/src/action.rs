//! Wizard actions and their wire protocol
//!
//! On the wire an action is an envelope `{ "type": TAG, "payload": ... }`.
//! Entity updates carry `{ "index": n, "data": patch }` as payload.
//!
//! Decoding is where malformed input is rejected: a known tag with a payload
//! of the wrong shape, down to a nested entity field, is an [`ActionError`].
//! An unknown tag decodes to [`Action::Unrecognized`], which the reducer
//! treats as a no-op. So is a negative position: it decodes to an index no
//! collection reaches.

use devfile_model::{
    Command, CommandPatch, Component, ComponentPatch, EventsPatch, MetadataPatch, Project,
    ProjectPatch, ValidationErrors, Variables,
};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ActionError;
use crate::step::Step;

/// Wire tags
pub mod tags {
    pub const NEXT_STEP: &str = "NEXT_STEP";
    pub const PREV_STEP: &str = "PREV_STEP";
    pub const GOTO_STEP: &str = "GOTO_STEP";
    pub const MARK_STEP_COMPLETED: &str = "MARK_STEP_COMPLETED";
    pub const UPDATE_METADATA: &str = "UPDATE_METADATA";
    pub const ADD_PROJECT: &str = "ADD_PROJECT";
    pub const REMOVE_PROJECT: &str = "REMOVE_PROJECT";
    pub const UPDATE_PROJECT: &str = "UPDATE_PROJECT";
    pub const ADD_COMPONENT: &str = "ADD_COMPONENT";
    pub const REMOVE_COMPONENT: &str = "REMOVE_COMPONENT";
    pub const UPDATE_COMPONENT: &str = "UPDATE_COMPONENT";
    pub const ADD_COMMAND: &str = "ADD_COMMAND";
    pub const REMOVE_COMMAND: &str = "REMOVE_COMMAND";
    pub const UPDATE_COMMAND: &str = "UPDATE_COMMAND";
    pub const UPDATE_EVENTS: &str = "UPDATE_EVENTS";
    pub const UPDATE_VARIABLES: &str = "UPDATE_VARIABLES";
    pub const SET_VARIABLES: &str = "SET_VARIABLES";
    pub const SET_VALIDATION_ERRORS: &str = "SET_VALIDATION_ERRORS";
    pub const RESET_WIZARD: &str = "RESET_WIZARD";
}

/// Everything a consumer can ask the wizard to do
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawAction")]
pub enum Action {
    NextStep,
    PrevStep,
    GotoStep(Step),
    MarkStepCompleted(Step),
    UpdateMetadata(MetadataPatch),
    AddProject(Project),
    RemoveProject(usize),
    UpdateProject { index: usize, patch: ProjectPatch },
    AddComponent(Component),
    RemoveComponent(usize),
    UpdateComponent { index: usize, patch: ComponentPatch },
    AddCommand(Command),
    RemoveCommand(usize),
    UpdateCommand { index: usize, patch: CommandPatch },
    UpdateEvents(EventsPatch),
    /// Merge into the variables map
    UpdateVariables(Variables),
    /// Replace the variables map
    SetVariables(Variables),
    SetValidationErrors(ValidationErrors),
    ResetWizard,
    /// Tag this wizard does not know
    Unrecognized(String),
}

impl Action {
    /// Wire tag of this action
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::NextStep => tags::NEXT_STEP,
            Self::PrevStep => tags::PREV_STEP,
            Self::GotoStep(_) => tags::GOTO_STEP,
            Self::MarkStepCompleted(_) => tags::MARK_STEP_COMPLETED,
            Self::UpdateMetadata(_) => tags::UPDATE_METADATA,
            Self::AddProject(_) => tags::ADD_PROJECT,
            Self::RemoveProject(_) => tags::REMOVE_PROJECT,
            Self::UpdateProject { .. } => tags::UPDATE_PROJECT,
            Self::AddComponent(_) => tags::ADD_COMPONENT,
            Self::RemoveComponent(_) => tags::REMOVE_COMPONENT,
            Self::UpdateComponent { .. } => tags::UPDATE_COMPONENT,
            Self::AddCommand(_) => tags::ADD_COMMAND,
            Self::RemoveCommand(_) => tags::REMOVE_COMMAND,
            Self::UpdateCommand { .. } => tags::UPDATE_COMMAND,
            Self::UpdateEvents(_) => tags::UPDATE_EVENTS,
            Self::UpdateVariables(_) => tags::UPDATE_VARIABLES,
            Self::SetVariables(_) => tags::SET_VARIABLES,
            Self::SetValidationErrors(_) => tags::SET_VALIDATION_ERRORS,
            Self::ResetWizard => tags::RESET_WIZARD,
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Decode one action from its JSON envelope
    ///
    /// # Errors
    /// Returns error if the envelope is malformed or the payload does not fit the tag
    pub fn from_json(json: &str) -> Result<Self, ActionError> {
        let raw: RawAction = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Decode one action from an already parsed envelope
    ///
    /// # Errors
    /// Returns error if the envelope is malformed or the payload does not fit the tag
    pub fn from_value(value: JsonValue) -> Result<Self, ActionError> {
        let raw: RawAction = serde_json::from_value(value)?;
        Self::try_from(raw)
    }
}

/// Untyped action envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub payload: JsonValue,
}

/// Payload of the positional remove actions
#[derive(Debug, Deserialize)]
struct Position(#[serde(deserialize_with = "position")] usize);

/// Payload of the positional update actions
#[derive(Debug, Deserialize)]
struct Indexed<P> {
    #[serde(deserialize_with = "position")]
    index: usize,
    data: P,
}

/// Integer position; negative values map to `usize::MAX`
fn position<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Forward(u64),
        Backward(i64),
    }

    Ok(match Helper::deserialize(deserializer)? {
        Helper::Forward(n) => usize::try_from(n).unwrap_or(usize::MAX),
        Helper::Backward(_) => usize::MAX,
    })
}

impl TryFrom<RawAction> for Action {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let RawAction { tag, payload } = raw;
        let action = match tag.as_str() {
            tags::NEXT_STEP => Self::NextStep,
            tags::PREV_STEP => Self::PrevStep,
            tags::GOTO_STEP => Self::GotoStep(payload_of(&tag, payload)?),
            tags::MARK_STEP_COMPLETED => Self::MarkStepCompleted(payload_of(&tag, payload)?),
            tags::UPDATE_METADATA => Self::UpdateMetadata(payload_of(&tag, payload)?),
            tags::ADD_PROJECT => Self::AddProject(payload_of(&tag, payload)?),
            tags::REMOVE_PROJECT => {
                let Position(index) = payload_of(&tag, payload)?;
                Self::RemoveProject(index)
            }
            tags::UPDATE_PROJECT => {
                let Indexed { index, data } = payload_of(&tag, payload)?;
                Self::UpdateProject { index, patch: data }
            }
            tags::ADD_COMPONENT => Self::AddComponent(payload_of(&tag, payload)?),
            tags::REMOVE_COMPONENT => {
                let Position(index) = payload_of(&tag, payload)?;
                Self::RemoveComponent(index)
            }
            tags::UPDATE_COMPONENT => {
                let Indexed { index, data } = payload_of(&tag, payload)?;
                Self::UpdateComponent { index, patch: data }
            }
            tags::ADD_COMMAND => Self::AddCommand(payload_of(&tag, payload)?),
            tags::REMOVE_COMMAND => {
                let Position(index) = payload_of(&tag, payload)?;
                Self::RemoveCommand(index)
            }
            tags::UPDATE_COMMAND => {
                let Indexed { index, data } = payload_of(&tag, payload)?;
                Self::UpdateCommand { index, patch: data }
            }
            tags::UPDATE_EVENTS => Self::UpdateEvents(payload_of(&tag, payload)?),
            tags::UPDATE_VARIABLES => Self::UpdateVariables(payload_of(&tag, payload)?),
            tags::SET_VARIABLES => Self::SetVariables(payload_of(&tag, payload)?),
            tags::SET_VALIDATION_ERRORS => Self::SetValidationErrors(payload_of(&tag, payload)?),
            tags::RESET_WIZARD => Self::ResetWizard,
            _ => Self::Unrecognized(tag),
        };
        Ok(action)
    }
}

fn payload_of<T: DeserializeOwned>(tag: &str, payload: JsonValue) -> Result<T, ActionError> {
    serde_json::from_value(payload).map_err(|source| ActionError::InvalidPayload {
        tag: tag.to_string(),
        source,
    })
}
