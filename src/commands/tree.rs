use std::fmt;
use std::marker::PhantomData;

use crate::commands::handler::Handler;
use crate::commands::{DispatchError, HandlerError, is_help_request};

/// Callback receiving rendered usage text
pub type UsageSink = Box<dyn Fn(&str)>;

/// Index of a node inside its [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Type-erased entry point of a leaf, monomorphised per handler type
pub(crate) trait LeafInvoke {
    fn invoke(&self, path: &str, tokens: &[String]) -> Result<(), HandlerError>;
    fn usage(&self, path: &str) -> String;
}

struct HandlerFactory<H>(PhantomData<fn() -> H>);

impl<H: Handler> LeafInvoke for HandlerFactory<H> {
    fn invoke(&self, path: &str, tokens: &[String]) -> Result<(), HandlerError> {
        H::default().run(path, tokens)
    }

    fn usage(&self, path: &str) -> String {
        H::usage(path)
    }
}

pub(crate) enum NodeKind {
    Leaf(Box<dyn LeafInvoke>),
    Group { children: Vec<NodeId> },
}

pub(crate) struct Node {
    pub name: String,
    pub description: Option<String>,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children } => children,
            NodeKind::Leaf(_) => &[],
        }
    }
}

/// Arena holding every node of a command tree plus the shared usage sink.
///
/// Node 0 is always the root group. Nodes are only ever appended, so a `NodeId` stays valid
/// for the lifetime of the tree.
pub struct Tree {
    nodes: Vec<Node>,
    sink: UsageSink,
}

impl Tree {
    pub(crate) fn new(name: &str, description: Option<&str>, sink: UsageSink) -> Self {
        Tree {
            nodes: vec![Node {
                name: name.to_string(),
                description: description.map(str::to_string),
                parent: None,
                kind: NodeKind::Group {
                    children: Vec::new(),
                },
            }],
            sink,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn attach_leaf<H: Handler>(
        &mut self,
        parent: NodeId,
        name: &str,
        description: Option<&str>,
    ) -> NodeId {
        self.attach(
            parent,
            name,
            description,
            NodeKind::Leaf(Box::new(HandlerFactory::<H>(PhantomData))),
        )
    }

    pub(crate) fn attach_group(
        &mut self,
        parent: NodeId,
        name: &str,
        description: Option<&str>,
    ) -> NodeId {
        self.attach(
            parent,
            name,
            description,
            NodeKind::Group {
                children: Vec::new(),
            },
        )
    }

    fn attach(
        &mut self,
        parent: NodeId,
        name: &str,
        description: Option<&str>,
        kind: NodeKind,
    ) -> NodeId {
        if self.find_child(parent, name).is_some() {
            log::warn!(
                "Duplicate command name '{name}' in '{}'; only the first one is reachable",
                self.path(parent)
            );
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            description: description.map(str::to_string),
            parent: Some(parent),
            kind,
        });
        // Builders only ever hold group ids.
        if let NodeKind::Group { children } = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        id
    }

    /// First child of `group` named `name`, in insertion order
    pub(crate) fn find_child(&self, group: NodeId, name: &str) -> Option<NodeId> {
        self.node(group)
            .children()
            .iter()
            .copied()
            .find(|&child| self.node(child).name == name)
    }

    /// Space-joined names from the root down to `id`
    pub(crate) fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names.join(" ")
    }

    pub(crate) fn emit_usage(&self, text: &str) {
        (self.sink)(text);
    }

    /// Route `tokens` starting at `id`.
    pub(crate) fn run(&self, id: NodeId, tokens: &[String]) -> Result<(), DispatchError> {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Leaf(leaf) => {
                let path = self.path(id);
                if is_help_request(tokens) {
                    log::debug!("Rendering usage for command '{path}'");
                    self.emit_usage(&leaf.usage(&path));
                    return Ok(());
                }
                log::debug!("Running '{path}' with {} argument(s)", tokens.len());
                leaf.invoke(&path, tokens).map_err(DispatchError::Handler)
            }
            NodeKind::Group { .. } => {
                let Some((first, rest)) = tokens.split_first() else {
                    return self.print_group_usage(id);
                };
                if is_help_request(tokens) {
                    return self.print_group_usage(id);
                }
                match self.find_child(id, first) {
                    Some(child) => self.run(child, rest),
                    None => {
                        let path = self.path(id);
                        log::debug!("No command '{first}' in '{path}'");
                        Err(DispatchError::NotFound {
                            token: first.clone(),
                            path,
                        })
                    }
                }
            }
        }
    }

    fn print_group_usage(&self, id: NodeId) -> Result<(), DispatchError> {
        log::debug!("Rendering usage for group '{}'", self.path(id));
        self.emit_usage(&crate::usage::render_group(self, id));
        Ok(())
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.node(NodeId::ROOT).name)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
