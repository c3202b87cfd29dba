//! Error types for the wizard
//!
//! The reducer itself never fails. These errors live at its edges:
//! - decoding actions from the wire protocol
//! - converting raw step indices
//! - positional edits that the reducer turns into no-ops

use crate::step::STEP_COUNT;

/// Action decoding errors
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Input is not an action envelope
    #[error("malformed action: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Known tag, payload of the wrong shape
    #[error("invalid payload for {tag}: {source}")]
    InvalidPayload {
        /// Action tag
        tag: String,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },
}

impl ActionError {
    /// Tag of the offending action, when known
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Malformed(_) => None,
            Self::InvalidPayload { tag, .. } => Some(tag),
        }
    }
}

/// Raw step index outside the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("step index {0} out of range (0..{count})", count = STEP_COUNT)]
pub struct InvalidStep(pub u8);

/// Positional edit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// No entity at the addressed position
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Requested position
        index: usize,
        /// Collection length at the time of the edit
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_step_display() {
        assert_eq!(InvalidStep(9).to_string(), "step index 9 out of range (0..7)");
    }

    #[test]
    fn edit_error_display() {
        let err = EditError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds (len 2)");
    }

    #[test]
    fn action_error_tag() {
        let source = serde_json::from_value::<usize>(serde_json::json!("x")).unwrap_err();
        let err = ActionError::InvalidPayload {
            tag: "REMOVE_COMMAND".to_string(),
            source,
        };
        assert_eq!(err.tag(), Some("REMOVE_COMMAND"));
        assert!(err.to_string().starts_with("invalid payload for REMOVE_COMMAND"));
    }
}
