//! Commands: exec, apply and composite

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::component::EnvVar;
use crate::document::Attributes;
use crate::merge::{merge_fields, Merge};
use crate::variant::{self, VariantKeys};

/// A command identified by `id`
///
/// A command without payload is treated as `exec`, the default variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub kind: Option<CommandKind>,
}

impl Command {
    /// Command with the given id and payload
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
            kind: Some(kind),
        }
    }

    /// Command with a blank id and the blank payload a form starts from
    #[inline]
    #[must_use]
    pub fn template(command_type: CommandType) -> Self {
        Self {
            id: String::new(),
            attributes: Attributes::new(),
            kind: Some(CommandKind::template(command_type)),
        }
    }

    /// Active variant, `exec` when no payload is present
    #[inline]
    #[must_use]
    pub fn command_type(&self) -> CommandType {
        self.kind
            .as_ref()
            .map_or(CommandType::Exec, CommandKind::command_type)
    }
}

/// Variant payload of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    Exec(ExecCommand),
    Apply(ApplyCommand),
    Composite(CompositeCommand),
}

impl VariantKeys for CommandKind {
    const KEYS: &'static [&'static str] = &["exec", "apply", "composite"];
}

impl CommandKind {
    /// Blank payload for `command_type`
    #[must_use]
    pub fn template(command_type: CommandType) -> Self {
        match command_type {
            CommandType::Exec => Self::Exec(ExecCommand {
                component: Some(String::new()),
                command_line: Some(String::new()),
                working_dir: Some(String::new()),
                ..ExecCommand::default()
            }),
            CommandType::Apply => Self::Apply(ApplyCommand {
                component: Some(String::new()),
                ..ApplyCommand::default()
            }),
            CommandType::Composite => Self::Composite(CompositeCommand {
                commands: Some(Vec::new()),
                parallel: Some(false),
                ..CompositeCommand::default()
            }),
        }
    }

    /// Variant tag
    #[must_use]
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::Exec(_) => CommandType::Exec,
            Self::Apply(_) => CommandType::Apply,
            Self::Composite(_) => CommandType::Composite,
        }
    }

    /// Overlay `patch` onto this payload
    ///
    /// The same variant merges field by field; a different variant replaces
    /// this payload entirely.
    #[must_use]
    pub fn overlay(self, patch: Self) -> Self {
        match (self, patch) {
            (Self::Exec(old), Self::Exec(new)) => Self::Exec(old.merge(new)),
            (Self::Apply(old), Self::Apply(new)) => Self::Apply(old.merge(new)),
            (Self::Composite(old), Self::Composite(new)) => Self::Composite(old.merge(new)),
            (_, replacement) => replacement,
        }
    }

    /// Component this command runs in or applies, if any
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::Exec(exec) => exec.component.as_deref(),
            Self::Apply(apply) => apply.component.as_deref(),
            Self::Composite(_) => None,
        }
    }
}

/// Command variant tag, spelled as the payload key on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandType {
    #[default]
    Exec,
    Apply,
    Composite,
}

impl CommandType {
    /// Every variant, in form display order
    pub const ALL: [Self; 3] = [Self::Exec, Self::Apply, Self::Composite];

    /// Wire key of the payload
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exec => "exec",
            Self::Apply => "apply",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown command type: {s}"))
    }
}

/// Shell command run inside a container component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_reload_capable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

merge_fields!(ExecCommand {
    component,
    command_line,
    working_dir,
    hot_reload_capable,
    env,
    label,
    group,
});

/// Applies a component (image build, cluster resource)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

merge_fields!(ApplyCommand {
    component,
    label,
    group,
});

/// Sequence of other commands, run serially or in parallel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
}

merge_fields!(CompositeCommand {
    commands,
    parallel,
    label,
    group,
});

/// Lifecycle group a command belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GroupKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Command group kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Build,
    Run,
    Test,
    Debug,
    Deploy,
}

/// Partial command update
///
/// Same wire shape as [`Command`] with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub kind: Option<CommandKind>,
}

impl CommandPatch {
    /// Patch carrying only a variant payload
    #[inline]
    #[must_use]
    pub fn kind(kind: CommandKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Patch changing the id
    #[inline]
    #[must_use]
    pub fn rename(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}
