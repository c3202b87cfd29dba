//! Components: containers, volumes, cluster resources and image builds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Attributes;
use crate::merge::{merge_fields, Merge};
use crate::variant::{self, VariantKeys};

/// A named workspace component
///
/// `kind` is `None` only while a form has not picked a type yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub kind: Option<ComponentKind>,
}

impl Component {
    /// Component with the given name and payload
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            kind: Some(kind),
        }
    }

    /// Unnamed component holding the blank payload a form starts from
    #[inline]
    #[must_use]
    pub fn template(component_type: ComponentType) -> Self {
        Self {
            name: String::new(),
            attributes: Attributes::new(),
            kind: Some(ComponentKind::template(component_type)),
        }
    }

    /// Active variant, if any
    #[inline]
    #[must_use]
    pub fn component_type(&self) -> Option<ComponentType> {
        self.kind.as_ref().map(ComponentKind::component_type)
    }
}

/// Variant payload of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Container(Container),
    Volume(Volume),
    Kubernetes(ClusterResource),
    Openshift(ClusterResource),
    Image(ImageBuild),
}

impl VariantKeys for ComponentKind {
    const KEYS: &'static [&'static str] =
        &["container", "volume", "kubernetes", "openshift", "image"];
}

impl ComponentKind {
    /// Blank payload for `component_type`
    #[must_use]
    pub fn template(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Container => Self::Container(Container {
                image: Some(String::new()),
                ..Container::default()
            }),
            ComponentType::Volume => Self::Volume(Volume {
                size: Some(String::new()),
                ..Volume::default()
            }),
            ComponentType::Kubernetes => Self::Kubernetes(ClusterResource {
                uri: Some(String::new()),
                ..ClusterResource::default()
            }),
            ComponentType::Openshift => Self::Openshift(ClusterResource {
                uri: Some(String::new()),
                ..ClusterResource::default()
            }),
            ComponentType::Image => Self::Image(ImageBuild {
                image_name: Some(String::new()),
                ..ImageBuild::default()
            }),
        }
    }

    /// Variant tag
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Container(_) => ComponentType::Container,
            Self::Volume(_) => ComponentType::Volume,
            Self::Kubernetes(_) => ComponentType::Kubernetes,
            Self::Openshift(_) => ComponentType::Openshift,
            Self::Image(_) => ComponentType::Image,
        }
    }

    /// Overlay `patch` onto this payload
    ///
    /// The same variant merges field by field; a different variant replaces
    /// this payload entirely.
    #[must_use]
    pub fn overlay(self, patch: Self) -> Self {
        match (self, patch) {
            (Self::Container(old), Self::Container(new)) => Self::Container(old.merge(new)),
            (Self::Volume(old), Self::Volume(new)) => Self::Volume(old.merge(new)),
            (Self::Kubernetes(old), Self::Kubernetes(new)) => Self::Kubernetes(old.merge(new)),
            (Self::Openshift(old), Self::Openshift(new)) => Self::Openshift(old.merge(new)),
            (Self::Image(old), Self::Image(new)) => Self::Image(old.merge(new)),
            (_, replacement) => replacement,
        }
    }
}

/// Component variant tag, spelled as the payload key on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Container,
    Volume,
    Kubernetes,
    Openshift,
    Image,
}

impl ComponentType {
    /// Every variant, in form display order
    pub const ALL: [Self; 5] = [
        Self::Container,
        Self::Volume,
        Self::Kubernetes,
        Self::Openshift,
        Self::Image,
    ];

    /// Wire key of the payload
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Volume => "volume",
            Self::Kubernetes => "kubernetes",
            Self::Openshift => "openshift",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown component type: {s}"))
    }
}

/// Development container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_sources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mapping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_pod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<VolumeMount>>,
}

merge_fields!(Container {
    image,
    memory_limit,
    memory_request,
    cpu_limit,
    cpu_request,
    mount_sources,
    source_mapping,
    dedicated_pod,
    command,
    args,
    env,
    endpoints,
    volume_mounts,
});

impl Container {
    /// Container running `image`
    #[inline]
    #[must_use]
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Self::default()
        }
    }
}

/// Persistent or ephemeral volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

merge_fields!(Volume { size, ephemeral });

/// Kubernetes or OpenShift resource, referenced by URI or inlined
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_by_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}

merge_fields!(ClusterResource {
    uri,
    inlined,
    deploy_by_default,
    endpoints,
});

/// Image built from a Dockerfile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBuild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_build: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<Dockerfile>,
}

merge_fields!(ImageBuild {
    image_name,
    auto_build,
    dockerfile,
});

/// Dockerfile location and build settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dockerfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

/// Environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Exposed port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

/// Volume mounted into a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Partial component update
///
/// Same wire shape as [`Component`] with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(flatten, deserialize_with = "variant::deserialize")]
    pub kind: Option<ComponentKind>,
}

impl ComponentPatch {
    /// Patch carrying only a variant payload
    #[inline]
    #[must_use]
    pub fn kind(kind: ComponentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Patch renaming the component
    #[inline]
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
