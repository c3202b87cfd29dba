//! Devfile Model
//!
//! Typed representation of a devfile 2.3.0 document as it is assembled by the
//! wizard, one section at a time.
//!
//! # Core Concepts
//!
//! - [`Document`]: the devfile being built, created by [`create_initial_document`]
//! - [`Component`] / [`ComponentKind`]: named components, exactly one variant payload each
//! - [`Command`] / [`CommandKind`]: commands identified by `id`, exactly one variant payload each
//! - [`Merge`]: field-wise overlay used when a patch targets the active variant
//! - [`render`]: serializes a document for preview and download
//! - [`lint`]: advisory findings keyed by field path
//!
//! Variant payloads never carry a discriminator field on the wire; the variant
//! is implied by which sub-record key is present.
//!
//! # Example
//!
//! ```rust
//! use devfile_model::{create_initial_document, render, PreviewOptions};
//!
//! let document = create_initial_document();
//! let yaml = render(&document, &PreviewOptions::default()).unwrap();
//! assert!(yaml.contains("schemaVersion: 2.3.0"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod command;
mod component;
mod document;
mod error;
mod lint;
mod merge;
mod project;
mod render;
mod variant;

pub use command::{
    ApplyCommand, Command, CommandGroup, CommandKind, CommandPatch, CommandType, CompositeCommand,
    ExecCommand, GroupKind,
};
pub use component::{
    ClusterResource, Component, ComponentKind, ComponentPatch, ComponentType, Container,
    Dockerfile, Endpoint, EnvVar, ImageBuild, Volume, VolumeMount,
};
pub use document::{
    create_initial_document, Attributes, Document, Events, EventsPatch, Metadata, MetadataPatch,
    ValidationErrors, Variables, SCHEMA_VERSION,
};
pub use error::RenderError;
pub use lint::lint;
pub use merge::Merge;
pub use project::{
    CheckoutFrom, GitSource, Project, ProjectPatch, ProjectSource, StarterProject, ZipSource,
};
pub use render::{render, suggested_file_name, PreviewFormat, PreviewOptions};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
