//! Core tree traits the scene graph exposes to its consumers

use crate::{ClassName, Node, NodeId};
use std::collections::{HashSet, VecDeque};

/// A rooted, ordered hierarchy of nodes addressed by generational handles
///
/// Implementations provide the primitive queries; the provided methods build
/// the usual navigation helpers on top of them. Every method must tolerate a
/// stale handle (one whose node has been removed) and treat it as absent.
///
/// # Example
///
/// ```ignore
/// fn print_tree<T: Tree>(tree: &T) {
///     for id in tree.walk(TraversalOrder::PreOrder) {
///         let node = tree.get(id).unwrap();
///         let depth = tree.depth(id);
///         println!("{:indent$}{}", "", node.name, indent = depth * 2);
///     }
/// }
/// ```
pub trait Tree {
    /// User-defined data stored at each node
    type NodeData;

    /// Get the root node ID (always live)
    fn root(&self) -> NodeId;

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is stale or was never issued by this tree.
    fn get(&self, id: NodeId) -> Option<&Node<Self::NodeData>>;

    /// Get the parent of a node
    ///
    /// Returns `None` for the root and for stale IDs.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Iterate over the current children of a node, in order
    ///
    /// Returns an empty iterator for stale IDs.
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Count live nodes in the tree
    fn node_count(&self) -> usize;

    /// Check whether a previously obtained handle still refers to a node
    fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get the name of a node
    fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Get the class tag of a node
    fn class(&self, id: NodeId) -> Option<&ClassName> {
        self.get(id).map(|n| &n.class)
    }

    /// Slash-separated names from the root down to this node
    ///
    /// Returns an empty string for stale IDs.
    fn path(&self, id: NodeId) -> String {
        let mut components = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            if let Some(name) = self.name(node_id) {
                components.push(name);
            }
            current = self.parent(node_id);
        }

        components.reverse();
        components.join("/")
    }

    /// Number of links between this node and the root (root = 0)
    ///
    /// A stale handle has no parent chain and reports 0.
    fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |&p| self.parent(p)).count()
    }

    /// Number of current children; 0 for stale handles
    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Parent chain from the immediate parent up to the root
    ///
    /// Empty for the root and for stale handles.
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        std::iter::successors(self.parent(id), |&p| self.parent(p)).collect()
    }

    /// Whether `ancestor` lies on the parent chain of `descendant`
    ///
    /// Always false when `descendant` is stale.
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        std::iter::successors(self.parent(descendant), |&p| self.parent(p))
            .any(|p| p == ancestor)
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent before children (top-down)
    PreOrder,
    /// Visit children before parent (bottom-up)
    PostOrder,
    /// Visit level by level (breadth-first)
    BreadthFirst,
}

/// Extension trait providing walking and lookup utilities
///
/// This trait is automatically implemented for all types that implement `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk the tree from the root in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.root(), order)
    }

    /// Walk the tree starting from a specific node (inclusive)
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, start, order)
    }

    /// Find nodes matching a predicate, in pre-order
    fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node<Self::NodeData>) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Find a node by its slash-separated path
    ///
    /// Only the leading component may name the root. Returns `None` if any
    /// component is missing.
    fn find_by_path(&self, path: &str) -> Option<NodeId> {
        let root = self.root();
        let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
        components.next_if(|&first| self.name(root) == Some(first));

        components.try_fold(root, |current, component| {
            self.children(current)
                .find(|&id| self.name(id) == Some(component))
        })
    }

    /// Find a node by name (first match in pre-order)
    fn find_by_name(&self, name: &str) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .find(|&id| self.name(id) == Some(name))
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Iterator for traversing a tree in different orders
///
/// Stale nodes are never yielded and their subtrees are not entered.
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    pending: VecDeque<NodeId>,
    expanded: HashSet<NodeId>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker starting from the given node
    pub fn new(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        let mut pending = VecDeque::new();
        if tree.is_live(start) {
            pending.push_back(start);
        }

        Self {
            tree,
            order,
            pending,
            expanded: HashSet::new(),
        }
    }

    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_back()?;

        // Push children in reverse so the first child is popped next
        let children: Vec<_> = self.tree.children(current).collect();
        for child in children.into_iter().rev() {
            self.pending.push_back(child);
        }

        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.pending.back() {
            if !self.expanded.insert(current) {
                self.pending.pop_back();
                return Some(current);
            }

            let children: Vec<_> = self.tree.children(current).collect();
            for child in children.into_iter().rev() {
                self.pending.push_back(child);
            }
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_front()?;
        self.pending.extend(self.tree.children(current));
        Some(current)
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}
