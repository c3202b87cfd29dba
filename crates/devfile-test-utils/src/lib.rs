//! Testing utilities for the devfile wizard workspace
//!
//! Shared fixtures, action scripts and replay helpers.

#![allow(missing_docs)]

use devfile_model::{
    Command, CommandKind, Component, ComponentKind, CompositeCommand, Container, ExecCommand,
    Project, Volume,
};
use devfile_wizard::{reduce, Action, WizardState, WizardStore};
use serde_json::{json, Value};

pub const TOOLS_IMAGE: &str = "quay.io/devfile/universal-developer-image:ubi9-latest";
pub const POSTGRES_IMAGE: &str = "quay.io/centos7/postgresql-13-centos7";
pub const QUARKUS_WORKDIR: &str = "${PROJECTS_ROOT}/quarkus-api-example";

pub fn tools_container() -> Component {
    Component::new("tools", ComponentKind::Container(Container::image(TOOLS_IMAGE)))
}

pub fn m2_volume() -> Component {
    Component::new(
        "m2",
        ComponentKind::Volume(Volume {
            size: Some("1G".to_string()),
            ephemeral: None,
        }),
    )
}

pub fn exec_command(id: &str, component: &str, command_line: &str) -> Command {
    Command::new(
        id,
        CommandKind::Exec(ExecCommand {
            component: Some(component.to_string()),
            command_line: Some(command_line.to_string()),
            ..ExecCommand::default()
        }),
    )
}

pub fn composite_command(id: &str, children: &[&str]) -> Command {
    Command::new(
        id,
        CommandKind::Composite(CompositeCommand {
            commands: Some(children.iter().map(|c| (*c).to_string()).collect()),
            parallel: Some(false),
            ..CompositeCommand::default()
        }),
    )
}

pub fn git_project(name: &str) -> Project {
    Project::git(name, format!("https://github.com/example/{name}.git"))
}

/// Fold `actions` over the initial state without a store
pub fn replay(actions: impl IntoIterator<Item = Action>) -> WizardState {
    actions
        .into_iter()
        .fold(WizardState::initial(), |state, action| reduce(&state, action))
}

/// Store that has already dispatched `actions`
pub fn store_with(actions: impl IntoIterator<Item = Action>) -> WizardStore {
    let mut store = WizardStore::new();
    store.dispatch_all(actions);
    store
}

/// Decode a script written with `json!`
pub fn actions(script: Value) -> Vec<Action> {
    serde_json::from_value(script).unwrap()
}

/// Action script walking the wizard through a simplified Quarkus API devfile,
/// the way the form pages dispatch it: blank templates first, then field edits.
pub fn quarkus_script() -> Value {
    json!([
        {"type": "UPDATE_METADATA", "payload": {"name": "quarkus-api-example"}},
        {"type": "NEXT_STEP"},
        {"type": "NEXT_STEP"},

        {"type": "ADD_COMPONENT", "payload": {"name": "", "container": {"image": ""}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"name": "tools"}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"image": TOOLS_IMAGE}}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"memoryLimit": "6G"}}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 0, "data": {"container": {"cpuLimit": "4000m"}}}},

        {"type": "ADD_COMPONENT", "payload": {"name": "", "container": {"image": ""}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 1, "data": {"name": "postgresql"}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 1, "data": {"container": {"image": POSTGRES_IMAGE}}}},

        {"type": "ADD_COMPONENT", "payload": {"name": "", "container": {"image": ""}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 2, "data": {"name": "m2"}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 2, "data": {"volume": {"size": ""}}}},
        {"type": "UPDATE_COMPONENT", "payload": {"index": 2, "data": {"volume": {"size": "1G"}}}},
        {"type": "NEXT_STEP"},

        {"type": "ADD_COMMAND", "payload": {"id": "", "exec": {"component": "", "commandLine": "", "workingDir": ""}}},
        {"type": "UPDATE_COMMAND", "payload": {"index": 0, "data": {"id": "package"}}},
        {"type": "UPDATE_COMMAND", "payload": {"index": 0, "data": {"exec": {
            "component": "tools",
            "commandLine": "./mvnw clean package -DskipTests=true",
            "workingDir": QUARKUS_WORKDIR
        }}}},
        {"type": "ADD_COMMAND", "payload": {"id": "", "exec": {"component": "", "commandLine": "", "workingDir": ""}}},
        {"type": "UPDATE_COMMAND", "payload": {"index": 1, "data": {"id": "startdev"}}},
        {"type": "UPDATE_COMMAND", "payload": {"index": 1, "data": {"exec": {
            "component": "tools",
            "commandLine": "./mvnw compile quarkus:dev",
            "workingDir": QUARKUS_WORKDIR
        }}}},
        {"type": "NEXT_STEP"},

        {"type": "UPDATE_EVENTS", "payload": {"postStart": ["package"]}},
        {"type": "NEXT_STEP"},
        {"type": "NEXT_STEP"}
    ])
}

pub fn quarkus_actions() -> Vec<Action> {
    actions(quarkus_script())
}
