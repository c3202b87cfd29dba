//! End-to-end wizard flows driven through the store.
//!
//! Each test dispatches the same actions a form page would and checks the
//! resulting snapshot, or the document rendered from it.

use devfile_model::{
    render, CommandKind, ComponentKind, ComponentType, Container, Document, PreviewFormat,
    PreviewOptions, Volume,
};
use devfile_test_utils::{
    actions, exec_command, quarkus_actions, replay, store_with, tools_container, POSTGRES_IMAGE,
    QUARKUS_WORKDIR, TOOLS_IMAGE,
};
use devfile_wizard::{Action, Step, WizardState, WizardStore};
use pretty_assertions::assert_eq;
use serde_json::json;

fn rendered_json(state: &WizardState) -> serde_json::Value {
    let text = render(
        &state.document,
        &PreviewOptions::new().with_format(PreviewFormat::Json),
    )
    .unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Editing one field of a container keeps the fields set earlier.
#[test]
fn container_field_edit_merges() {
    let state = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "tools", "container": {"image": "img:1"}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"memoryLimit": "6G"}}}}
    ])));

    assert_eq!(
        serde_json::to_value(&state.document.components[0]).unwrap(),
        json!({"name": "tools", "container": {"image": "img:1", "memoryLimit": "6G"}})
    );
}

/// Switching a command's type drops the old payload entirely.
#[test]
fn command_type_switch_replaces() {
    let state = replay(actions(json!([
        {"type": "ADD_COMMAND", "payload": {"id": "build", "exec": {"component": "tools", "commandLine": "make"}}},
        {"type": "UPDATE_COMMAND", "payload": {"index": 0, "data": {"composite": {"commands": [], "parallel": false}}}}
    ])));

    assert_eq!(
        serde_json::to_value(&state.document.commands[0]).unwrap(),
        json!({"id": "build", "composite": {"commands": [], "parallel": false}})
    );
}

/// Switching a volume to a container keeps only the name.
#[test]
fn component_type_switch_replaces() {
    let state = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "m2", "volume": {"size": "1G"}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"image": "maven"}}}}
    ])));

    let component = &state.document.components[0];
    assert_eq!(component.name, "m2");
    assert_eq!(
        component.kind,
        Some(ComponentKind::Container(Container::image("maven")))
    );
}

/// The Quarkus walkthrough ends on the review step with every section filled.
#[test]
fn quarkus_walkthrough() {
    let store = store_with(quarkus_actions());
    let state = store.state();

    assert_eq!(state.current_step(), Step::Review);
    for step in &Step::ALL[..6] {
        assert!(state.progress.is_completed(*step), "{step} not completed");
    }
    assert!(!state.progress.is_completed(Step::Review));

    let doc = rendered_json(&state);
    assert_eq!(doc["schemaVersion"], "2.3.0");
    assert_eq!(doc["metadata"]["name"], "quarkus-api-example");

    assert_eq!(
        doc["components"],
        json!([
            {"name": "tools", "container": {"image": TOOLS_IMAGE, "memoryLimit": "6G", "cpuLimit": "4000m"}},
            {"name": "postgresql", "container": {"image": POSTGRES_IMAGE}},
            {"name": "m2", "volume": {"size": "1G"}}
        ])
    );
    assert_eq!(doc["commands"][0]["id"], "package");
    assert_eq!(doc["commands"][0]["exec"]["component"], "tools");
    assert_eq!(doc["commands"][0]["exec"]["workingDir"], QUARKUS_WORKDIR);
    assert_eq!(doc["commands"][1]["exec"]["commandLine"], "./mvnw compile quarkus:dev");
    assert_eq!(doc["events"], json!({"postStart": ["package"]}));
}

/// Rendered YAML never carries a discriminator key on components or commands.
#[test]
fn rendered_yaml_has_no_discriminators() {
    let state = replay([
        Action::AddComponent(tools_container()),
        Action::AddCommand(exec_command("build", "tools", "make")),
    ]);
    let yaml = render(&state.document, &PreviewOptions::default()).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    let component = &value["components"][0];
    assert!(component.get("type").is_none());
    assert!(component.get("container").is_some());

    let command = &value["commands"][0];
    assert!(command.get("kind").is_none());
    assert!(command.get("exec").is_some());
}

/// A minimal walkthrough with only a name still renders every top-level key.
#[test]
fn minimal_walkthrough_renders_top_level_keys() {
    let mut store = WizardStore::new();
    store.dispatch(Action::UpdateMetadata(devfile_model::MetadataPatch::name("test-devfile")));
    for _ in 0..6 {
        store.dispatch(Action::NextStep);
    }

    let doc = rendered_json(&store.state());
    assert_eq!(doc["metadata"], json!({"name": "test-devfile"}));
    for key in ["projects", "components", "commands"] {
        assert_eq!(doc[key], json!([]), "{key}");
    }
    assert_eq!(doc["events"], json!({}));
    assert_eq!(doc["variables"], json!({}));
}

/// Removing a component shifts later indices so the next update lands on
/// the entity that moved down.
#[test]
fn remove_then_update_addresses_shifted_entity() {
    let state = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "a", "volume": {}}},
        {"type": "ADD_COMPONENT", "payload": {"name": "b", "volume": {}}},
        {"type": "REMOVE_COMPONENT", "payload": 0},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"volume": {"size": "2G"}}}}
    ])));

    assert_eq!(state.document.components.len(), 1);
    assert_eq!(state.document.components[0].name, "b");
    assert_eq!(
        state.document.components[0].kind,
        Some(ComponentKind::Volume(Volume {
            size: Some("2G".to_string()),
            ephemeral: None,
        }))
    );
}

/// Reset from the middle of a walkthrough yields the fresh state.
#[test]
fn reset_mid_walkthrough() {
    let mut store = store_with(quarkus_actions().into_iter().take(12));
    store.dispatch(Action::ResetWizard);
    assert_eq!(*store.state(), WizardState::initial());
}

/// Snapshots survive a round trip through their serialized form.
#[test]
fn snapshot_serializes_for_collaborators() {
    let state = replay(quarkus_actions());
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["currentStep"], 6);
    assert_eq!(value["completedSteps"], json!([0, 1, 2, 3, 4, 5]));

    let back: WizardState = serde_json::from_value(value).unwrap();
    assert_eq!(back, state);
}

/// Negative positions leave the document as it was.
#[test]
fn negative_positions_are_no_ops() {
    let before = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "tools", "container": {"image": "img:1"}}}
    ])));
    let mut store = WizardStore::with_state(before.clone());
    store.dispatch_all(actions(json!([
        {"type": "REMOVE_COMPONENT", "payload": -1},
        {"type": "UPDATE_COMPONENT", "payload": {"index": -1, "data": {"name": "renamed"}}},
        {"type": "REMOVE_COMMAND", "payload": -3}
    ])));

    assert_eq!(store.revision(), 3);
    assert_eq!(*store.state(), before);
}

/// A blank volume and a blank exec command keep their variant through the preview.
#[test]
fn blank_variants_survive_the_preview() {
    let state = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "m2", "volume": {}}},
        {"type": "ADD_COMMAND", "payload": {"id": "build", "exec": {"component": "", "commandLine": "", "workingDir": ""}}}
    ])));

    let rendered = rendered_json(&state);
    assert_eq!(rendered["components"], json!([{"name": "m2", "volume": {}}]));
    assert_eq!(rendered["commands"], json!([{"id": "build", "exec": {}}]));

    let back: Document = serde_json::from_value(rendered).unwrap();
    assert_eq!(back.components[0].component_type(), Some(ComponentType::Volume));
    assert!(matches!(back.commands[0].kind, Some(CommandKind::Exec(_))));
}

/// Half-filled endpoints stay on the container until the form completes them.
#[test]
fn half_filled_endpoint_is_kept() {
    let state = replay(actions(json!([
        {"type": "ADD_COMPONENT", "payload": {"name": "tools", "container": {"image": "img:1", "endpoints": [{"name": "http"}]}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"endpoints": [{"name": "http", "targetPort": 8080}]}}}}
    ])));

    assert_eq!(
        serde_json::to_value(&state.document.components[0]).unwrap(),
        json!({
            "name": "tools",
            "container": {"image": "img:1", "endpoints": [{"name": "http", "targetPort": 8080}]}
        })
    );
}
