//! Document root, metadata, events and variables

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::component::Component;
use crate::project::{Project, StarterProject};

/// Devfile schema version produced by the wizard
pub const SCHEMA_VERSION: &str = "2.3.0";

/// Free-form attributes attached to the document or an entity
pub type Attributes = OrdMap<String, serde_json::Value>;

/// Variable name to value
pub type Variables = OrdMap<String, String>;

/// Field path to advisory message
pub type ValidationErrors = OrdMap<String, String>;

/// The devfile being built
///
/// Collections are persistent: cloning a document is cheap and every edit
/// shares untouched structure with the previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub schema_version: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub projects: Vector<Project>,
    #[serde(default)]
    pub components: Vector<Component>,
    #[serde(default)]
    pub commands: Vector<Command>,
    #[serde(default)]
    pub events: Events,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default, skip_serializing_if = "Vector::is_empty")]
    pub starter_projects: Vector<StarterProject>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            metadata: Metadata::default(),
            projects: Vector::new(),
            components: Vector::new(),
            commands: Vector::new(),
            events: Events::default(),
            variables: Variables::new(),
            starter_projects: Vector::new(),
            attributes: Attributes::new(),
        }
    }
}

/// Fresh document: every scalar empty, every collection empty
#[inline]
#[must_use]
pub fn create_initial_document() -> Document {
    Document::default()
}

/// Descriptive metadata block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
    pub language: String,
    pub project_type: String,
    pub provider: String,
    pub tags: Vec<String>,
    pub website: String,
    pub support_url: String,
}

impl Metadata {
    /// Shallow merge: every field present in `patch` overwrites
    #[must_use]
    pub fn merge(self, patch: MetadataPatch) -> Self {
        Self {
            name: patch.name.unwrap_or(self.name),
            version: patch.version.unwrap_or(self.version),
            display_name: patch.display_name.unwrap_or(self.display_name),
            description: patch.description.unwrap_or(self.description),
            language: patch.language.unwrap_or(self.language),
            project_type: patch.project_type.unwrap_or(self.project_type),
            provider: patch.provider.unwrap_or(self.provider),
            tags: patch.tags.unwrap_or(self.tags),
            website: patch.website.unwrap_or(self.website),
            support_url: patch.support_url.unwrap_or(self.support_url),
        }
    }
}

/// Partial metadata update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
}

impl MetadataPatch {
    /// Patch setting only the name
    #[inline]
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Lifecycle bindings: command ids run at each workspace phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Events {
    pub pre_start: Vector<String>,
    pub post_start: Vector<String>,
    pub pre_stop: Vector<String>,
    pub post_stop: Vector<String>,
}

impl Events {
    /// Shallow merge: every phase present in `patch` is replaced
    #[must_use]
    pub fn merge(self, patch: EventsPatch) -> Self {
        Self {
            pre_start: patch.pre_start.unwrap_or(self.pre_start),
            post_start: patch.post_start.unwrap_or(self.post_start),
            pre_stop: patch.pre_stop.unwrap_or(self.pre_stop),
            post_stop: patch.post_stop.unwrap_or(self.post_stop),
        }
    }

    /// Phase name and bound command ids, in lifecycle order
    pub fn phases(&self) -> [(&'static str, &Vector<String>); 4] {
        [
            ("preStart", &self.pre_start),
            ("postStart", &self.post_start),
            ("preStop", &self.pre_stop),
            ("postStop", &self.post_stop),
        ]
    }
}

/// Partial events update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_start: Option<Vector<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_start: Option<Vector<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_stop: Option<Vector<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_stop: Option<Vector<String>>,
}
