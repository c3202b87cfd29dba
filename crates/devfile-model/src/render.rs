//! Preview rendering
//!
//! Converts a [`Document`] to the text shown in the preview pane and offered
//! for download. The document goes through a JSON value first so that empty
//! form fields can be pruned uniformly before the final serializer runs.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::command::CommandKind;
use crate::component::ComponentKind;
use crate::document::Document;
use crate::error::RenderError;
use crate::project::ProjectSource;
use crate::variant::VariantKeys;

/// Output text format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Yaml,
    Json,
}

impl PreviewFormat {
    /// File extension, without the dot
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Preview settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Output format
    pub format: PreviewFormat,
    /// Drop empty strings, lists and maps below the top-level keys, except
    /// an entity's variant payload
    pub prune_empty: bool,
}

impl PreviewOptions {
    /// Default options: YAML, pruned
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With output format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: PreviewFormat) -> Self {
        self.format = format;
        self
    }

    /// With pruning switched on or off
    #[inline]
    #[must_use]
    pub fn with_prune_empty(mut self, prune_empty: bool) -> Self {
        self.prune_empty = prune_empty;
        self
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            format: PreviewFormat::Yaml,
            prune_empty: true,
        }
    }
}

/// Render `document` as text
///
/// # Errors
/// Returns error if the serializer rejects the document
pub fn render(document: &Document, options: &PreviewOptions) -> Result<String, RenderError> {
    let mut value = serde_json::to_value(document)?;

    // Top-level keys stay even when empty; only their contents are pruned.
    if options.prune_empty {
        if let JsonValue::Object(map) = &mut value {
            for (section, child) in map.iter_mut() {
                match child {
                    JsonValue::Array(entities) => {
                        let variants = variant_keys(section);
                        for entity in entities.iter_mut() {
                            prune_entity(entity, variants);
                        }
                    }
                    other => prune_children(other),
                }
            }
        }
    }

    match options.format {
        PreviewFormat::Yaml => Ok(serde_yaml::to_string(&value)?),
        PreviewFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
    }
}

/// Download name for a document rendered with `format`
#[inline]
#[must_use]
pub fn suggested_file_name(format: PreviewFormat) -> String {
    format!("devfile.{}", format.extension())
}

/// Payload keys of the entities listed under `section`
fn variant_keys(section: &str) -> &'static [&'static str] {
    match section {
        "projects" | "starterProjects" => ProjectSource::KEYS,
        "components" => ComponentKind::KEYS,
        "commands" => CommandKind::KEYS,
        _ => &[],
    }
}

/// Prune an entity but keep its variant payload, however empty
fn prune_entity(entity: &mut JsonValue, variants: &[&str]) {
    let JsonValue::Object(fields) = entity else {
        prune_children(entity);
        return;
    };
    for child in fields.values_mut() {
        prune_children(child);
    }
    fields.retain(|key, child| variants.contains(&key.as_str()) || !is_empty(child));
}

/// Remove empty members of `value`, bottom-up
fn prune_children(value: &mut JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for child in map.values_mut() {
                prune_children(child);
            }
            map.retain(|_, child| !is_empty(child));
        }
        JsonValue::Array(items) => {
            for item in items.iter_mut() {
                prune_children(item);
            }
        }
        _ => {}
    }
}

fn is_empty(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}
