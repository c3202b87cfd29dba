//! Projects and starter projects

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Attributes;
use crate::variant::{self, VariantKeys};

/// Source code cloned into the workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_path: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub source: Option<ProjectSource>,
}

impl Project {
    /// Git project with a single `origin` remote
    #[must_use]
    pub fn git(name: impl Into<String>, origin: impl Into<String>) -> Self {
        let mut remotes = BTreeMap::new();
        remotes.insert("origin".to_string(), origin.into());
        Self {
            name: name.into(),
            source: Some(ProjectSource::Git(GitSource {
                remotes,
                checkout_from: None,
            })),
            ..Self::default()
        }
    }

    /// Shallow merge: every field present in `patch` overwrites, a source
    /// replaces the previous source
    #[must_use]
    pub fn merge(self, patch: ProjectPatch) -> Self {
        Self {
            name: patch.name.unwrap_or(self.name),
            clone_path: patch.clone_path.or(self.clone_path),
            attributes: patch.attributes.unwrap_or(self.attributes),
            source: patch.source.or(self.source),
        }
    }
}

/// Where a project's code comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectSource {
    Git(GitSource),
    Zip(ZipSource),
}

impl VariantKeys for ProjectSource {
    const KEYS: &'static [&'static str] = &["git", "zip"];
}

/// Git remotes and the revision to check out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSource {
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_from: Option<CheckoutFrom>,
}

/// Remote and revision selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// Archive download
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Partial project update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub source: Option<ProjectSource>,
}

/// Template project offered when a workspace starts empty
///
/// Carried through the wizard untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterProject {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub source: Option<ProjectSource>,
}
