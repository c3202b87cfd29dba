//! Wizard step machine
//!
//! Seven linear steps, one per document section. Progress is a current step
//! plus the set of steps the user has advanced past.
//!
//! Transitions are total: `next` saturates at [`Step::Review`], `prev`
//! saturates at [`Step::Metadata`], and `goto` accepts any step. Gating free
//! navigation to reachable steps is left to the navigation UI, which asks
//! [`StepProgress::is_reachable`].

use std::fmt;

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::error::InvalidStep;

/// Number of wizard steps
pub const STEP_COUNT: usize = 7;

/// One page of the wizard
///
/// Serialized as its index (0..=6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    #[default]
    Metadata,
    Projects,
    Components,
    Commands,
    Events,
    Variables,
    Review,
}

impl Step {
    /// All steps in wizard order
    pub const ALL: [Self; STEP_COUNT] = [
        Self::Metadata,
        Self::Projects,
        Self::Components,
        Self::Commands,
        Self::Events,
        Self::Variables,
        Self::Review,
    ];

    /// First step
    pub const FIRST: Self = Self::Metadata;

    /// Terminal step
    pub const LAST: Self = Self::Review;

    /// Position in the wizard
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Step at `index`, if any
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step, staying on the terminal step
    #[inline]
    #[must_use]
    pub fn saturating_next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step, staying on the first step
    #[inline]
    #[must_use]
    pub fn saturating_prev(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::FIRST)
    }

    /// Stable identifier
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Projects => "projects",
            Self::Components => "components",
            Self::Commands => "commands",
            Self::Events => "events",
            Self::Variables => "variables",
            Self::Review => "review",
        }
    }

    /// Heading shown for the step
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Metadata => "Basic Information",
            Self::Projects => "Projects",
            Self::Components => "Components",
            Self::Commands => "Commands",
            Self::Events => "Events",
            Self::Variables => "Variables",
            Self::Review => "Review & Download",
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step as u8
    }
}

impl TryFrom<u8> for Step {
    type Error = InvalidStep;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(usize::from(index)).ok_or(InvalidStep(index))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Where the user is and which steps they have advanced past
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub current_step: Step,
    #[serde(default)]
    pub completed_steps: OrdSet<Step>,
}

impl StepProgress {
    /// Progress at the first step with nothing completed
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step, recording the step being left as completed
    ///
    /// From the terminal step the position holds but the step is still
    /// recorded.
    #[must_use]
    pub fn next(&self) -> Self {
        let next = self.current_step.saturating_next();
        tracing::trace!(from = %self.current_step, to = %next, "next step");
        Self {
            current_step: next,
            completed_steps: self.completed_steps.update(self.current_step),
        }
    }

    /// Go back one step; completion is untouched
    #[must_use]
    pub fn prev(&self) -> Self {
        let prev = self.current_step.saturating_prev();
        tracing::trace!(from = %self.current_step, to = %prev, "previous step");
        Self {
            current_step: prev,
            completed_steps: self.completed_steps.clone(),
        }
    }

    /// Jump to `step` unconditionally
    #[must_use]
    pub fn goto(&self, step: Step) -> Self {
        tracing::trace!(from = %self.current_step, to = %step, "goto step");
        Self {
            current_step: step,
            completed_steps: self.completed_steps.clone(),
        }
    }

    /// Record `step` as completed without moving
    #[must_use]
    pub fn mark_completed(&self, step: Step) -> Self {
        Self {
            current_step: self.current_step,
            completed_steps: self.completed_steps.update(step),
        }
    }

    /// Whether `step` has been advanced past
    #[inline]
    #[must_use]
    pub fn is_completed(&self, step: Step) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Whether a navigation UI may jump to `step`
    #[inline]
    #[must_use]
    pub fn is_reachable(&self, step: Step) -> bool {
        step == self.current_step || self.is_completed(step)
    }

    /// Progress caption, e.g. "Step 3 of 7"
    #[must_use]
    pub fn caption(&self) -> String {
        format!("Step {} of {}", self.current_step.index() + 1, STEP_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_records_the_step_left() {
        let progress = StepProgress::new().next();
        assert_eq!(progress.current_step, Step::Projects);
        assert!(progress.is_completed(Step::Metadata));
        assert!(!progress.is_completed(Step::Projects));
    }

    #[test]
    fn next_from_review_stays_and_records() {
        let progress = StepProgress::new().goto(Step::Review).next();
        assert_eq!(progress.current_step, Step::Review);
        assert!(progress.is_completed(Step::Review));

        let again = progress.next().next();
        assert_eq!(again.completed_steps.len(), 1);
    }

    #[test]
    fn prev_from_first_stays() {
        let progress = StepProgress::new().prev();
        assert_eq!(progress.current_step, Step::Metadata);
        assert!(progress.completed_steps.is_empty());
    }

    #[test]
    fn prev_keeps_completion() {
        let progress = StepProgress::new().next().next().prev();
        assert_eq!(progress.current_step, Step::Projects);
        assert!(progress.is_completed(Step::Metadata));
        assert!(progress.is_completed(Step::Projects));
    }

    #[test]
    fn goto_ignores_gating() {
        let progress = StepProgress::new().goto(Step::Variables);
        assert_eq!(progress.current_step, Step::Variables);
        assert!(progress.completed_steps.is_empty());
    }

    #[test]
    fn mark_completed_does_not_move() {
        let progress = StepProgress::new().mark_completed(Step::Events);
        assert_eq!(progress.current_step, Step::Metadata);
        assert!(progress.is_completed(Step::Events));
        assert!(progress.is_reachable(Step::Events));
        assert!(!progress.is_reachable(Step::Commands));
    }

    #[test]
    fn step_serializes_as_index() {
        assert_eq!(serde_json::to_value(Step::Commands).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::from_value::<Step>(serde_json::json!(6)).unwrap(), Step::Review);
        assert!(serde_json::from_value::<Step>(serde_json::json!(7)).is_err());
        assert!(serde_json::from_value::<Step>(serde_json::json!(-1)).is_err());
    }

    #[test]
    fn titles_and_caption() {
        assert_eq!(Step::Metadata.title(), "Basic Information");
        assert_eq!(Step::Review.title(), "Review & Download");
        assert_eq!(StepProgress::new().goto(Step::Components).caption(), "Step 3 of 7");
    }

    fn any_step() -> impl Strategy<Value = Step> {
        (0..STEP_COUNT).prop_map(|i| Step::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_next_prev_stay_in_range(moves in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut progress = StepProgress::new();
            for forward in moves {
                progress = if forward { progress.next() } else { progress.prev() };
                prop_assert!(progress.current_step.index() < STEP_COUNT);
            }
        }

        #[test]
        fn prop_mark_completed_is_idempotent(step in any_step(), times in 1..5usize) {
            let mut progress = StepProgress::new();
            for _ in 0..times {
                progress = progress.mark_completed(step);
            }
            prop_assert_eq!(progress.completed_steps.len(), 1);
        }

        #[test]
        fn prop_index_roundtrip(step in any_step()) {
            prop_assert_eq!(Step::try_from(u8::from(step)), Ok(step));
        }
    }
}
