//! Positional edits on entity collections
//!
//! Projects, components and commands are addressed by their index in the
//! document. Every edit returns a new collection; the input is untouched.
//!
//! How a patch lands on an entity is decided by [`Entity::apply_patch`]:
//! a patch naming a variant other than the active one replaces the entity,
//! anything else merges into it.

use devfile_model::{Command, CommandPatch, Component, ComponentPatch, Project, ProjectPatch};
use im::Vector;

use crate::error::EditError;

/// How a patch is combined with the entity it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Entity rebuilt from the patch, keeping only its identifier
    Replace,
    /// Patch fields overwrite, the rest survives
    Merge,
}

/// A collection member that can be updated from a patch
pub trait Entity: Clone {
    /// Partial update payload
    type Patch;

    /// How `patch` would be combined with `self`
    fn update_mode(&self, patch: &Self::Patch) -> UpdateMode;

    /// Combine `patch` with `self`
    #[must_use]
    fn apply_patch(&self, patch: Self::Patch) -> Self;
}

/// Replacement when the patch names a variant and it is not the active one
fn variant_mode<T: PartialEq>(active: Option<T>, requested: Option<T>) -> UpdateMode {
    match (active, requested) {
        (Some(active), Some(requested)) if active == requested => UpdateMode::Merge,
        (_, Some(_)) => UpdateMode::Replace,
        (_, None) => UpdateMode::Merge,
    }
}

impl Entity for Project {
    type Patch = ProjectPatch;

    fn update_mode(&self, _patch: &ProjectPatch) -> UpdateMode {
        UpdateMode::Merge
    }

    fn apply_patch(&self, patch: ProjectPatch) -> Self {
        self.clone().merge(patch)
    }
}

impl Entity for Component {
    type Patch = ComponentPatch;

    fn update_mode(&self, patch: &ComponentPatch) -> UpdateMode {
        variant_mode(
            self.component_type(),
            patch.kind.as_ref().map(|kind| kind.component_type()),
        )
    }

    fn apply_patch(&self, patch: ComponentPatch) -> Self {
        match self.update_mode(&patch) {
            UpdateMode::Replace => Self {
                name: patch.name.unwrap_or_else(|| self.name.clone()),
                attributes: patch.attributes.unwrap_or_default(),
                kind: patch.kind,
            },
            UpdateMode::Merge => Self {
                name: patch.name.unwrap_or_else(|| self.name.clone()),
                attributes: patch
                    .attributes
                    .unwrap_or_else(|| self.attributes.clone()),
                kind: match (self.kind.clone(), patch.kind) {
                    (Some(old), Some(new)) => Some(old.overlay(new)),
                    (old, new) => new.or(old),
                },
            },
        }
    }
}

impl Entity for Command {
    type Patch = CommandPatch;

    fn update_mode(&self, patch: &CommandPatch) -> UpdateMode {
        variant_mode(
            self.kind.as_ref().map(|kind| kind.command_type()),
            patch.kind.as_ref().map(|kind| kind.command_type()),
        )
    }

    fn apply_patch(&self, patch: CommandPatch) -> Self {
        match self.update_mode(&patch) {
            UpdateMode::Replace => Self {
                id: patch.id.unwrap_or_else(|| self.id.clone()),
                attributes: patch.attributes.unwrap_or_default(),
                kind: patch.kind,
            },
            UpdateMode::Merge => Self {
                id: patch.id.unwrap_or_else(|| self.id.clone()),
                attributes: patch
                    .attributes
                    .unwrap_or_else(|| self.attributes.clone()),
                kind: match (self.kind.clone(), patch.kind) {
                    (Some(old), Some(new)) => Some(old.overlay(new)),
                    (old, new) => new.or(old),
                },
            },
        }
    }
}

/// Append `entity`
#[must_use]
pub fn add<E: Clone>(collection: &Vector<E>, entity: E) -> Vector<E> {
    let mut next = collection.clone();
    next.push_back(entity);
    next
}

/// Delete the entity at `index`, shifting later entries down
///
/// # Errors
/// Returns error if `index` is out of bounds
pub fn remove<E: Clone>(collection: &Vector<E>, index: usize) -> Result<Vector<E>, EditError> {
    check_index(collection, index)?;
    let mut next = collection.clone();
    next.remove(index);
    Ok(next)
}

/// Apply `patch` to the entity at `index`
///
/// # Errors
/// Returns error if `index` is out of bounds
pub fn update<E: Entity>(
    collection: &Vector<E>,
    index: usize,
    patch: E::Patch,
) -> Result<Vector<E>, EditError> {
    let current = collection.get(index).ok_or(EditError::IndexOutOfBounds {
        index,
        len: collection.len(),
    })?;
    Ok(collection.update(index, current.apply_patch(patch)))
}

fn check_index<E: Clone>(collection: &Vector<E>, index: usize) -> Result<(), EditError> {
    if index < collection.len() {
        Ok(())
    } else {
        Err(EditError::IndexOutOfBounds {
            index,
            len: collection.len(),
        })
    }
}
