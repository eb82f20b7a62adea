//! Serializable description of a command tree, for docs and completion generators

use serde::{Deserialize, Serialize};

use crate::commands::tree::{NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Command,
    Group,
}

/// One node of the tree with everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescription {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: CommandKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandDescription>,
}

impl CommandDescription {
    pub(crate) fn from_tree(tree: &Tree, id: NodeId) -> Self {
        let node = tree.node(id);
        CommandDescription {
            name: node.name.clone(),
            path: tree.path(id),
            description: node.description.clone(),
            kind: if node.is_group() {
                CommandKind::Group
            } else {
                CommandKind::Command
            },
            children: node
                .children()
                .iter()
                .map(|&child| CommandDescription::from_tree(tree, child))
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error; with the types used here this does not happen in
    /// practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Every leaf below (and including) this node, depth first
    #[must_use]
    pub fn commands(&self) -> Vec<&CommandDescription> {
        match self.kind {
            CommandKind::Command => vec![self],
            CommandKind::Group => self
                .children
                .iter()
                .flat_map(CommandDescription::commands)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HandlerError;
    use crate::commands::handler::Handler;

    #[derive(Default)]
    struct Noop;

    impl Handler for Noop {
        fn run(&mut self, _path: &str, _tokens: &[String]) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    fn tree() -> Tree {
        let mut tree = Tree::new("test", None, Box::new(|_| {}));
        tree.attach_leaf::<Noop>(NodeId::ROOT, "clean", None);
        let plugin = tree.attach_group(NodeId::ROOT, "plugin", None);
        tree.attach_leaf::<Noop>(plugin, "reset", Some("Reset all plugins"));
        tree
    }

    #[test]
    fn test_json_shape() {
        let description = CommandDescription::from_tree(&tree(), NodeId::ROOT);
        let value: serde_json::Value = serde_json::from_str(&description.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "test",
                "path": "test",
                "kind": "group",
                "children": [
                    {"name": "clean", "path": "test clean", "kind": "command"},
                    {
                        "name": "plugin",
                        "path": "test plugin",
                        "kind": "group",
                        "children": [{
                            "name": "reset",
                            "path": "test plugin reset",
                            "description": "Reset all plugins",
                            "kind": "command"
                        }]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_empty_group() {
        let mut tree = tree();
        tree.attach_group(NodeId::ROOT, "empty", None);
        let description = CommandDescription::from_tree(&tree, NodeId::ROOT);
        let parsed: CommandDescription =
            serde_json::from_str(&description.to_json().unwrap()).unwrap();
        assert_eq!(parsed, description);
        assert_eq!(parsed.children[2].kind, CommandKind::Group);
    }

    #[test]
    fn test_commands_lists_leaves() {
        let description = CommandDescription::from_tree(&tree(), NodeId::ROOT);
        let paths: Vec<&str> = description
            .commands()
            .iter()
            .map(|c| c.path.as_str())
            .collect();
        assert_eq!(paths, ["test clean", "test plugin reset"]);
    }
}
