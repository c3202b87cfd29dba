//! Snapshot store
//!
//! [`WizardStore`] owns the current [`WizardState`] and runs every dispatched
//! action through [`reduce`]. Each dispatch publishes a new snapshot and
//! notifies listeners in subscription order.
//!
//! There is no process-wide store. Entry points construct one and pass it to
//! whatever needs it.

use std::fmt;
use std::sync::Arc;

use crate::action::Action;
use crate::reducer::{reduce, WizardState};

/// Callback invoked with every new snapshot
pub type Listener = Box<dyn FnMut(&Arc<WizardState>) + Send>;

/// Handle returned by [`WizardStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Holder of the current wizard snapshot
pub struct WizardStore {
    state: Arc<WizardState>,
    revision: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl WizardStore {
    /// Store holding the initial state
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(WizardState::initial())
    }

    /// Store resuming from `state`
    #[must_use]
    pub fn with_state(state: WizardState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn state(&self) -> Arc<WizardState> {
        Arc::clone(&self.state)
    }

    /// Snapshots produced since construction
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `action` and notify listeners
    pub fn dispatch(&mut self, action: Action) {
        let tag = action.tag().to_string();
        self.state = Arc::new(reduce(&self.state, action));
        self.revision += 1;
        tracing::debug!(action = %tag, revision = self.revision, "dispatched");

        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Apply `actions` in order
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Register `listener` for every future snapshot
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Arc<WizardState>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WizardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardStore")
            .field("revision", &self.revision)
            .field("current_step", &self.state.current_step())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;
    use std::sync::Mutex;

    #[test]
    fn dispatch_publishes_new_snapshot() {
        let mut store = WizardStore::new();
        let before = store.state();

        store.dispatch(Action::NextStep);

        assert_eq!(store.revision(), 1);
        assert_eq!(store.state().current_step(), Step::Projects);
        assert_eq!(before.current_step(), Step::Metadata);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = WizardStore::new();

        for name in ["first", "second"] {
            let seen = Arc::clone(&seen);
            store.subscribe(move |state| {
                seen.lock().unwrap().push((name, state.current_step()));
            });
        }
        store.dispatch(Action::GotoStep(Step::Events));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", Step::Events), ("second", Step::Events)]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0));
        let mut store = WizardStore::new();
        let id = {
            let count = Arc::clone(&count);
            store.subscribe(move |_| *count.lock().unwrap() += 1)
        };

        store.dispatch(Action::NextStep);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Action::NextStep);

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn no_op_actions_still_count_as_revisions() {
        let mut store = WizardStore::new();
        store.dispatch_all([Action::RemoveProject(3), Action::Unrecognized("X".into())]);
        assert_eq!(store.revision(), 2);
        assert_eq!(*store.state(), WizardState::initial());
    }
}
