use derive_more::Display;

use crate::NodeId;

/// Errors raised by structural edits of a [`SceneTree`](crate::SceneTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TreeError {
    /// The handle refers to a node that was removed (or never existed)
    #[display(fmt = "{} does not refer to a live node", _0)]
    StaleNode(NodeId),

    /// The root cannot be removed or moved
    #[display(fmt = "the root node cannot be removed or reparented")]
    RootNode,

    /// Moving `node` under `parent` would make it its own ancestor
    #[display(fmt = "cannot move {} under its own descendant {}", node, parent)]
    CyclicReparent { node: NodeId, parent: NodeId },
}

impl std::error::Error for TreeError {}
