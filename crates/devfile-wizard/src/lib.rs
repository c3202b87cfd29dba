//! Devfile Wizard
//!
//! Step machine, action reducer and snapshot store behind the guided devfile
//! editor.
//!
//! A consumer builds a [`WizardStore`], dispatches [`Action`]s and reads
//! [`WizardState`] snapshots. All transitions go through the pure [`reduce`]
//! function, so any state can be reproduced by replaying its actions.
//!
//! # Quick Start
//!
//! ```rust
//! use devfile_wizard::prelude::*;
//!
//! let mut store = WizardStore::new();
//! store.dispatch(Action::UpdateMetadata(MetadataPatch::name("demo")));
//! store.dispatch(Action::NextStep);
//!
//! let state = store.state();
//! assert_eq!(state.current_step(), Step::Projects);
//! assert!(state.progress.is_completed(Step::Metadata));
//! assert_eq!(state.document.metadata.name, "demo");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod action;
pub mod entity;
pub mod error;
pub mod reducer;
pub mod step;
pub mod store;

pub use action::{Action, RawAction};
pub use entity::{Entity, UpdateMode};
pub use error::{ActionError, EditError, InvalidStep};
pub use reducer::{reduce, WizardState};
pub use step::{Step, StepProgress, STEP_COUNT};
pub use store::{Listener, SubscriptionId, WizardStore};

/// Common imports for consumers
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::reducer::{reduce, WizardState};
    pub use crate::step::{Step, StepProgress};
    pub use crate::store::WizardStore;
    pub use devfile_model::{
        Command, CommandKind, CommandPatch, Component, ComponentKind, ComponentPatch, Document,
        MetadataPatch, Project, ProjectPatch,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
