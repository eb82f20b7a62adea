use crate::commands::handler::Handler;
use crate::commands::tree::{NodeId, Tree};

/// Builder scoped to a single group of the tree.
///
/// Handed to the callback of `add_group`; it can only add children to the group it was
/// created for.
#[derive(Debug)]
pub struct GroupBuilder<'a> {
    tree: &'a mut Tree,
    group: NodeId,
}

impl<'a> GroupBuilder<'a> {
    pub(crate) fn new(tree: &'a mut Tree, group: NodeId) -> Self {
        GroupBuilder { tree, group }
    }

    /// Append a command handled by `H`.
    pub fn add<H: Handler>(&mut self, name: &str, description: Option<&str>) -> &mut Self {
        self.tree.attach_leaf::<H>(self.group, name, description);
        self
    }

    /// Append a nested group and populate it through `populate`.
    ///
    /// `populate` runs exactly once, before this call returns.
    pub fn add_group<F>(&mut self, name: &str, description: Option<&str>, populate: F) -> &mut Self
    where
        F: FnOnce(&mut GroupBuilder<'_>),
    {
        let child = self.tree.attach_group(self.group, name, description);
        populate(&mut GroupBuilder::new(self.tree, child));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HandlerError;

    #[derive(Default)]
    struct Noop;

    impl Handler for Noop {
        fn run(&mut self, _path: &str, _tokens: &[String]) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_nests_groups() {
        let mut tree = Tree::new("test", None, Box::new(|_| {}));
        let mut calls = 0;
        GroupBuilder::new(&mut tree, NodeId::ROOT)
            .add::<Noop>("clean", None)
            .add_group("plugin", Some("Plugins"), |plugin| {
                calls += 1;
                plugin
                    .add::<Noop>("add", None)
                    .add_group("registry", None, |registry| {
                        registry.add::<Noop>("login", None);
                    });
            });

        assert_eq!(calls, 1);
        let plugin = tree.find_child(NodeId::ROOT, "plugin").unwrap();
        let registry = tree.find_child(plugin, "registry").unwrap();
        let login = tree.find_child(registry, "login").unwrap();
        assert_eq!(tree.path(login), "test plugin registry login");
        assert_eq!(tree.node(plugin).description.as_deref(), Some("Plugins"));
        assert!(tree.find_child(NodeId::ROOT, "login").is_none());
    }
}
