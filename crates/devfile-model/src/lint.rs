//! Advisory document checks
//!
//! The wizard never blocks on these findings. Form steps run [`lint`] and
//! store the result as the state's validation errors so that fields can be
//! highlighted while the user keeps navigating.

use std::collections::HashSet;

use crate::command::CommandKind;
use crate::document::{Document, ValidationErrors};

/// Collect advisory findings for `document`, keyed by field path
#[must_use]
pub fn lint(document: &Document) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if document.metadata.name.trim().is_empty() {
        errors.insert("metadata.name".to_string(), "name is required".to_string());
    }

    lint_components(document, &mut errors);
    lint_commands(document, &mut errors);
    lint_events(document, &mut errors);

    errors
}

fn lint_components(document: &Document, errors: &mut ValidationErrors) {
    let mut seen = HashSet::new();
    for (index, component) in document.components.iter().enumerate() {
        let path = format!("components[{index}]");
        if component.name.trim().is_empty() {
            errors.insert(format!("{path}.name"), "name is required".to_string());
        } else if !seen.insert(component.name.as_str()) {
            errors.insert(
                format!("{path}.name"),
                format!("duplicate component name: {}", component.name),
            );
        }
        if component.kind.is_none() {
            errors.insert(path, "component type is required".to_string());
        }
    }
}

fn lint_commands(document: &Document, errors: &mut ValidationErrors) {
    let components: HashSet<&str> = document
        .components
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    let ids: HashSet<&str> = document.commands.iter().map(|c| c.id.as_str()).collect();

    let mut seen = HashSet::new();
    for (index, command) in document.commands.iter().enumerate() {
        let path = format!("commands[{index}]");
        if command.id.trim().is_empty() {
            errors.insert(format!("{path}.id"), "id is required".to_string());
        } else if !seen.insert(command.id.as_str()) {
            errors.insert(
                format!("{path}.id"),
                format!("duplicate command id: {}", command.id),
            );
        }

        let Some(kind) = &command.kind else {
            errors.insert(path, "command type is required".to_string());
            continue;
        };

        match kind {
            CommandKind::Exec(_) | CommandKind::Apply(_) => {
                let field = format!("{path}.{}.component", kind.command_type());
                match kind.component() {
                    None | Some("") => {
                        errors.insert(field, "component is required".to_string());
                    }
                    Some(name) if !components.contains(name) => {
                        errors.insert(field, format!("unknown component: {name}"));
                    }
                    Some(_) => {}
                }
                if let CommandKind::Exec(exec) = kind {
                    if exec.command_line.as_deref().map_or(true, str::is_empty) {
                        errors.insert(
                            format!("{path}.exec.commandLine"),
                            "command line is required".to_string(),
                        );
                    }
                }
            }
            CommandKind::Composite(composite) => {
                for (position, child) in composite.commands.iter().flatten().enumerate() {
                    if !ids.contains(child.as_str()) {
                        errors.insert(
                            format!("{path}.composite.commands[{position}]"),
                            format!("unknown command: {child}"),
                        );
                    }
                }
            }
        }
    }
}

fn lint_events(document: &Document, errors: &mut ValidationErrors) {
    let ids: HashSet<&str> = document.commands.iter().map(|c| c.id.as_str()).collect();
    for (phase, bound) in document.events.phases() {
        for (position, id) in bound.iter().enumerate() {
            if !ids.contains(id.as_str()) {
                errors.insert(
                    format!("events.{phase}[{position}]"),
                    format!("unknown command: {id}"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandType, CompositeCommand, ExecCommand};
    use crate::component::{Component, ComponentKind, Container};
    use crate::document::create_initial_document;

    fn exec(id: &str, component: &str) -> Command {
        Command::new(
            id,
            CommandKind::Exec(ExecCommand {
                component: Some(component.to_string()),
                command_line: Some("make".to_string()),
                ..ExecCommand::default()
            }),
        )
    }

    fn valid_document() -> Document {
        let mut document = create_initial_document();
        document.metadata.name = "demo".to_string();
        document.components.push_back(Component::new(
            "tools",
            ComponentKind::Container(Container::image("img:1")),
        ));
        document.commands.push_back(exec("build", "tools"));
        document.events.post_start.push_back("build".to_string());
        document
    }

    #[test]
    fn valid_document_has_no_findings() {
        assert!(lint(&valid_document()).is_empty());
    }

    #[test]
    fn initial_document_needs_a_name() {
        let errors = lint(&create_initial_document());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("metadata.name"));
    }

    #[test]
    fn duplicate_component_names_are_reported_on_the_later_entry() {
        let mut document = valid_document();
        document.components.push_back(Component::new(
            "tools",
            ComponentKind::Container(Container::image("img:2")),
        ));

        let errors = lint(&document);
        assert_eq!(
            errors.get("components[1].name").map(String::as_str),
            Some("duplicate component name: tools")
        );
        assert!(!errors.contains_key("components[0].name"));
    }

    #[test]
    fn unknown_references_are_reported() {
        let mut document = valid_document();
        document.commands.push_back(exec("run", "missing"));
        document.commands.push_back(Command::new(
            "all",
            CommandKind::Composite(CompositeCommand {
                commands: Some(vec!["build".to_string(), "ghost".to_string()]),
                ..CompositeCommand::default()
            }),
        ));
        document.events.pre_stop.push_back("ghost".to_string());

        let errors = lint(&document);
        assert_eq!(
            errors.get("commands[1].exec.component").map(String::as_str),
            Some("unknown component: missing")
        );
        assert!(errors.contains_key("commands[2].composite.commands[1]"));
        assert!(!errors.contains_key("commands[2].composite.commands[0]"));
        assert!(errors.contains_key("events.preStop[0]"));
    }

    #[test]
    fn blank_templates_are_reported() {
        let mut document = valid_document();
        document.commands.push_back(Command::template(CommandType::Exec));
        document.components.push_back(Component::default());

        let errors = lint(&document);
        assert!(errors.contains_key("commands[1].id"));
        assert!(errors.contains_key("commands[1].exec.component"));
        assert!(errors.contains_key("commands[1].exec.commandLine"));
        assert!(errors.contains_key("components[1].name"));
        assert!(errors.contains_key("components[1]"));
    }
}
