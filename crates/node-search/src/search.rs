//! Depth-first descendant searches with closest-match and all-matches policies

use derive_more::Display;
use log::{debug, trace};
use scene_tree::{NodeId, Tree};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::iter::FusedIterator;

use crate::{Category, SearchError};

/// What a search does after a node matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SearchPolicy {
    /// Emit the match and skip its subtree
    #[display(fmt = "closest")]
    Closest,

    /// Emit the match and keep descending into it
    #[display(fmt = "all")]
    All,
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// The search root: expanded, never tested
    Root(NodeId),
    /// A descendant waiting to be tested, with the parent it was found under
    Node { id: NodeId, parent: NodeId },
}

/// A paused depth-first search that does not borrow the tree
///
/// Each call to [`next_match`](Self::next_match) resumes the walk against the
/// tree as it is at that moment, so the caller may edit the tree between
/// pulls. Removed nodes are skipped along with their subtrees, and a node
/// moved away from the parent it was found under is skipped at its old
/// position. Children are snapshotted when their parent is expanded: nodes
/// inserted under an already expanded parent are not visited. No node is
/// visited twice, even if it is moved into a part of the tree not yet walked.
///
/// The search is forward-only. Start a new one to search again.
#[derive(Debug, Clone)]
pub struct SubtreeSearch<C> {
    category: C,
    policy: SearchPolicy,
    stack: SmallVec<[Frame; 16]>,
    /// Match whose children are expanded on the next pull
    deferred: Option<NodeId>,
    visited: HashSet<NodeId>,
    matched: usize,
    reported: bool,
}

impl<C> SubtreeSearch<C> {
    /// Prepare a search below `root`
    ///
    /// Fails with [`SearchError::NullRoot`] when no root is given. A stale
    /// root is accepted and yields nothing.
    pub fn new(
        root: impl Into<Option<NodeId>>,
        category: C,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        let root = root.into().ok_or(SearchError::NullRoot)?;
        debug!("starting {} search below {}", policy, root);

        let mut stack = SmallVec::new();
        stack.push(Frame::Root(root));
        Ok(Self {
            category,
            policy,
            stack,
            deferred: None,
            visited: HashSet::new(),
            matched: 0,
            reported: false,
        })
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    /// True once the walk has run out of nodes
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty() && self.deferred.is_none()
    }

    /// Resume the walk and return the next matching node, if any
    pub fn next_match<T>(&mut self, tree: &T) -> Option<NodeId>
    where
        T: Tree + ?Sized,
        C: Category<T::NodeData>,
    {
        if let Some(id) = self.deferred.take() {
            self.expand(tree, id);
        }

        while let Some(frame) = self.stack.pop() {
            let (id, testable) = match frame {
                Frame::Root(id) => (id, false),
                Frame::Node { id, parent } => {
                    if tree.is_live(id) && tree.parent(id) != Some(parent) {
                        trace!("skipping {}, moved away from {}", id, parent);
                        continue;
                    }
                    (id, true)
                }
            };

            let Some(node) = tree.get(id) else {
                trace!("skipping stale {}", id);
                continue;
            };
            if !self.visited.insert(id) {
                trace!("skipping {}, already visited", id);
                continue;
            }

            if !(testable && self.category.matches(node)) {
                self.expand(tree, id);
                continue;
            }

            self.matched += 1;
            trace!("matched {} ({})", id, node.name);
            if self.policy == SearchPolicy::All {
                self.deferred = Some(id);
            }
            return Some(id);
        }

        if !self.reported {
            self.reported = true;
            debug!(
                "{} search done: {} visited, {} matched",
                self.policy,
                self.visited.len(),
                self.matched
            );
        }
        None
    }

    /// Push a snapshot of `id`'s children, first child on top
    fn expand<T: Tree + ?Sized>(&mut self, tree: &T, id: NodeId) {
        if !tree.is_live(id) {
            trace!("not descending into stale {}", id);
            return;
        }

        let children: SmallVec<[NodeId; 8]> = tree.children(id).collect();
        self.stack.extend(
            children
                .into_iter()
                .rev()
                .map(|child| Frame::Node { id: child, parent: id }),
        );
    }

    /// Bind this search to a tree as an iterator
    pub fn walk<T>(self, tree: &T) -> Descendants<'_, T, C>
    where
        T: Tree + ?Sized,
        C: Category<T::NodeData>,
    {
        Descendants { tree, search: self }
    }
}

/// A [`SubtreeSearch`] bound to one borrowed tree
pub struct Descendants<'t, T: ?Sized, C> {
    tree: &'t T,
    search: SubtreeSearch<C>,
}

impl<'t, T: ?Sized, C> Descendants<'t, T, C> {
    /// Release the tree borrow, keeping the walk's position
    pub fn into_search(self) -> SubtreeSearch<C> {
        self.search
    }
}

impl<'t, T, C> Iterator for Descendants<'t, T, C>
where
    T: Tree + ?Sized,
    C: Category<T::NodeData>,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.search.next_match(self.tree)
    }
}

impl<'t, T, C> FusedIterator for Descendants<'t, T, C>
where
    T: Tree + ?Sized,
    C: Category<T::NodeData>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnyNode, Class};
    use scene_tree::{Node, SceneTree};

    fn chain() -> (SceneTree<()>, [NodeId; 3]) {
        let mut tree = SceneTree::new(Node::new("root", "Node", ()));
        let a = tree.add_child(tree.root(), Node::new("a", "Sprite", ())).unwrap();
        let b = tree.add_child(a, Node::new("b", "Sprite", ())).unwrap();
        let c = tree.add_child(b, Node::new("c", "Sprite", ())).unwrap();
        (tree, [a, b, c])
    }

    #[test]
    fn test_null_root_fails_at_entry() {
        let err = SubtreeSearch::new(None, AnyNode, SearchPolicy::All).unwrap_err();
        assert_eq!(err, SearchError::NullRoot);
    }

    #[test]
    fn test_root_is_not_emitted() {
        let (tree, [a, ..]) = chain();
        let found: Vec<_> = SubtreeSearch::new(a, Class::new("Sprite"), SearchPolicy::Closest)
            .unwrap()
            .walk(&tree)
            .collect();
        assert_eq!(found.len(), 1);
        assert_ne!(found[0], a);
    }

    #[test]
    fn test_removing_emitted_match_stops_descent() {
        let (mut tree, [a, b, _]) = chain();
        let mut search = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::All).unwrap();

        assert_eq!(search.next_match(&tree), Some(a));
        tree.remove(b).unwrap();
        assert_eq!(search.next_match(&tree), None);
        assert!(search.is_finished());
    }

    #[test]
    fn test_node_moved_into_unvisited_branch_is_emitted_once() {
        let mut tree = SceneTree::new(Node::new("root", "Node", ()));
        let a = tree.add_child(tree.root(), Node::new("a", "Sprite", ())).unwrap();
        let x = tree.add_child(a, Node::new("x", "Sprite", ())).unwrap();
        let b = tree.add_child(tree.root(), Node::new("b", "Sprite", ())).unwrap();
        let mut search = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::All).unwrap();

        assert_eq!(search.next_match(&tree), Some(a));
        assert_eq!(search.next_match(&tree), Some(x));
        tree.reparent(x, b).unwrap();

        let rest: Vec<_> = search.walk(&tree).collect();
        assert_eq!(rest, vec![b]);
    }

    #[test]
    fn test_pending_node_moved_is_visited_at_new_position() {
        let mut tree = SceneTree::new(Node::new("root", "Node", ()));
        let a = tree.add_child(tree.root(), Node::new("a", "Sprite", ())).unwrap();
        let b = tree.add_child(tree.root(), Node::new("b", "Sprite", ())).unwrap();
        let x = tree.add_child(b, Node::new("x", "Sprite", ())).unwrap();
        let mut search = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::All).unwrap();

        assert_eq!(search.next_match(&tree), Some(a));
        tree.reparent(b, a).unwrap();

        let rest: Vec<_> = search.walk(&tree).collect();
        assert_eq!(rest, vec![b, x]);
    }

    #[test]
    fn test_children_added_to_expanded_parent_are_not_seen() {
        let (mut tree, [a, b, c]) = chain();
        let mut search = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::All).unwrap();

        assert_eq!(search.next_match(&tree), Some(a));
        assert_eq!(search.next_match(&tree), Some(b));
        tree.add_child(a, Node::new("late", "Timer", ())).unwrap();

        let rest: Vec<_> = search.walk(&tree).collect();
        assert_eq!(rest, vec![c]);
    }

    #[test]
    fn test_children_added_to_deferred_match_are_seen() {
        let (mut tree, [a, b, c]) = chain();
        let mut search = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::All).unwrap();

        assert_eq!(search.next_match(&tree), Some(a));
        let late = tree.add_child(a, Node::new("late", "Timer", ())).unwrap();

        let rest: Vec<_> = search.walk(&tree).collect();
        assert_eq!(rest, vec![b, c, late]);
    }

    #[test]
    fn test_exhausted_search_stays_exhausted() {
        let (tree, _) = chain();
        let mut iter = SubtreeSearch::new(tree.root(), AnyNode, SearchPolicy::Closest)
            .unwrap()
            .walk(&tree);

        assert!(iter.next().is_some());
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert!(iter.into_search().is_finished());
    }
}
