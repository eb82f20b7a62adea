//! Routing of command-line tokens through a tree of commands
//!
//! A [`Dispatcher`] owns a tree of named commands and nested command groups. The tree is
//! declared once with a fluent builder; afterwards every call to [`Dispatcher::run`] walks
//! it one token per level until a command is reached, whose handler receives whatever
//! tokens are left. An empty token list or a lone `help`, `-h` or `--help` at any level
//! renders usage text instead.
//!
//! ```
//! use cmdtree::{Dispatcher, Handler, HandlerError};
//!
//! #[derive(Default)]
//! struct Clean;
//!
//! impl Handler for Clean {
//!     fn run(&mut self, _path: &str, _tokens: &[String]) -> Result<(), HandlerError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::with_sink("tool", None, |_| {});
//! dispatcher
//!     .add::<Clean>("clean", Some("Remove build output"))
//!     .add_group("cache", None, |cache| {
//!         cache.add::<Clean>("purge", None);
//!     });
//! dispatcher.run(&["cache", "purge"]).unwrap();
//! ```

use std::collections::HashSet;

use log::warn;

use crate::commands::tree::{NodeId, Tree, UsageSink};

pub mod commands;
pub mod describe;
pub mod logger;
mod usage;

pub use crate::commands::group::GroupBuilder;
pub use crate::commands::handler::{ArgsHandler, Arguments, Handler};
pub use crate::commands::{DispatchError, HandlerError};
pub use crate::describe::{CommandDescription, CommandKind};

/// Root of a command tree.
///
/// The root's name is the first word of every path shown in usage text; it is never
/// matched against input tokens.
#[derive(Debug)]
pub struct Dispatcher {
    tree: Tree,
}

impl Dispatcher {
    /// Create a dispatcher that prints usage text to stdout.
    #[must_use]
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Self::with_sink(name, description, |text| println!("{text}"))
    }

    /// Create a dispatcher that hands usage text to `sink`.
    #[must_use]
    pub fn with_sink<F>(name: &str, description: Option<&str>, sink: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        let sink: UsageSink = Box::new(sink);
        Dispatcher {
            tree: Tree::new(name, description, sink),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.tree.node(NodeId::ROOT).name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.tree.node(NodeId::ROOT).description.as_deref()
    }

    /// Append a top-level command handled by `H`.
    pub fn add<H: Handler>(&mut self, name: &str, description: Option<&str>) -> &mut Self {
        GroupBuilder::new(&mut self.tree, NodeId::ROOT).add::<H>(name, description);
        self
    }

    /// Append a top-level group; `populate` declares its children.
    pub fn add_group<F>(&mut self, name: &str, description: Option<&str>, populate: F) -> &mut Self
    where
        F: FnOnce(&mut GroupBuilder<'_>),
    {
        GroupBuilder::new(&mut self.tree, NodeId::ROOT).add_group(name, description, populate);
        self
    }

    /// Route `tokens` (program name already removed) to a command.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::NotFound` when a token names no child of the current group,
    /// or `DispatchError::Handler` with the handler's own failure.
    pub fn run<S: AsRef<str>>(&self, tokens: &[S]) -> Result<(), DispatchError> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        log::debug!("Dispatching {tokens:?} from '{}'", self.name());
        self.tree.run(NodeId::ROOT, &tokens)
    }

    /// Render the usage text of the whole tree through the sink.
    pub fn print_usage(&self) {
        self.tree.emit_usage(&self.usage());
    }

    /// Usage text of the whole tree.
    #[must_use]
    pub fn usage(&self) -> String {
        usage::render_group(&self.tree, NodeId::ROOT)
    }

    /// Resolve a chain of names without running anything.
    ///
    /// Uses the same first-match rule as [`Dispatcher::run`]. An empty `names` resolves to
    /// the root.
    #[must_use]
    pub fn find<S: AsRef<str>>(&self, names: &[S]) -> Option<NodeRef<'_>> {
        let mut id = NodeId::ROOT;
        for name in names {
            id = self.tree.find_child(id, name.as_ref())?;
        }
        Some(NodeRef {
            tree: &self.tree,
            id,
        })
    }

    /// Snapshot of the tree that can be serialized.
    #[must_use]
    pub fn describe(&self) -> CommandDescription {
        CommandDescription::from_tree(&self.tree, NodeId::ROOT)
    }

    /// Check the tree for empty names and duplicate sibling names.
    ///
    /// The builder accepts both so that declaration stays chainable; call this once after
    /// building (or in a test) to catch them.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::EmptyName` or `DispatchError::DuplicateName` for the first
    /// problem found, depth first.
    pub fn validate(&self) -> Result<(), DispatchError> {
        validate_group(&self.tree, NodeId::ROOT)
    }
}

/// Borrowed view of one node, returned by [`Dispatcher::find`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.tree.node(self.id).name
    }

    #[must_use]
    pub fn description(&self) -> Option<&'a str> {
        self.tree.node(self.id).description.as_deref()
    }

    /// Space-joined names from the root to this node
    #[must_use]
    pub fn path(&self) -> String {
        self.tree.path(self.id)
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.tree.node(self.id).is_group()
    }
}

fn validate_group(tree: &Tree, group: NodeId) -> Result<(), DispatchError> {
    let children = tree.node(group).children();
    if children.is_empty() && group != NodeId::ROOT {
        warn!("Group '{}' has no commands", tree.path(group));
    }

    let mut seen = HashSet::new();
    for &child in children {
        let node = tree.node(child);
        if node.name.trim().is_empty() {
            return Err(DispatchError::EmptyName {
                path: tree.path(group),
            });
        }
        if !seen.insert(node.name.as_str()) {
            return Err(DispatchError::DuplicateName {
                path: tree.path(group),
                name: node.name.clone(),
            });
        }
        if node.is_group() {
            validate_group(tree, child)?;
        }
    }
    Ok(())
}
