//! Action scripts
//!
//! A script is a list of action envelopes, written in YAML or JSON:
//!
//! ```yaml
//! - type: UPDATE_METADATA
//!   payload: { name: demo }
//! - type: NEXT_STEP
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use devfile_wizard::{Action, WizardStore};
use serde_json::Value;

/// Parse a script, picking JSON for `.json` files and YAML otherwise
///
/// # Errors
/// Returns error if the file cannot be read or any action fails to decode
pub fn load(path: &Path) -> Result<Vec<Action>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document: Value = if is_json {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    };
    decode(document)
}

/// Decode every action in `script`, reporting the position of the first bad one
///
/// # Errors
/// Returns error if `script` is not a list or an entry fails to decode
pub fn decode(script: Value) -> Result<Vec<Action>> {
    let Value::Array(entries) = script else {
        bail!("script must be a list of actions");
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            let action =
                Action::from_value(entry).with_context(|| format!("action #{position}"))?;
            if let Action::Unrecognized(tag) = &action {
                tracing::warn!(position, %tag, "unrecognized action will be ignored");
            }
            Ok(action)
        })
        .collect()
}

/// Dispatch `actions` through a fresh store
#[must_use]
pub fn run(actions: Vec<Action>) -> WizardStore {
    let mut store = WizardStore::new();
    let count = actions.len();
    store.dispatch_all(actions);
    tracing::info!(count, step = %store.state().current_step(), "script applied");
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use devfile_wizard::Step;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn decodes_list() {
        let actions = decode(json!([
            {"type": "NEXT_STEP"},
            {"type": "GOTO_STEP", "payload": 6}
        ]))
        .unwrap();
        assert_eq!(actions, vec![Action::NextStep, Action::GotoStep(Step::Review)]);
    }

    #[test]
    fn rejects_non_list() {
        let err = decode(json!({"type": "NEXT_STEP"})).unwrap_err();
        assert!(err.to_string().contains("list of actions"));
    }

    #[test]
    fn reports_position_of_bad_action() {
        let err = decode(json!([
            {"type": "NEXT_STEP"},
            {"type": "REMOVE_COMMAND", "payload": "x"}
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "action #1");
    }

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "- type: UPDATE_METADATA\n  payload:\n    name: demo\n- type: NEXT_STEP\n"
        )
        .unwrap();

        let store = run(load(file.path()).unwrap());
        assert_eq!(store.revision(), 2);
        assert_eq!(store.state().document.metadata.name, "demo");
        assert_eq!(store.state().current_step(), Step::Projects);
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"type": "PREV_STEP"}}]"#).unwrap();
        assert_eq!(load(file.path()).unwrap(), vec![Action::PrevStep]);
    }
}
