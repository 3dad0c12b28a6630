//! Arena-backed scene tree with generational handles

use log::trace;

use crate::{Node, NodeId, Tree, TreeError};

/// Occupied slot contents
#[derive(Debug, Clone)]
struct Entry<D> {
    node: Node<D>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena slot; `generation` persists across frees so old handles go stale
#[derive(Debug, Clone)]
struct Slot<D> {
    generation: u32,
    entry: Option<Entry<D>>,
}

/// A mutable scene graph that owns its nodes
///
/// Nodes are addressed with [`NodeId`] handles. Removing a node destroys its
/// whole subtree; any handle to a destroyed node keeps compiling and keeps
/// being passed around, but every query treats it as absent.
///
/// # Example
///
/// ```
/// use scene_tree::{Node, SceneTree, Tree};
///
/// let mut scene = SceneTree::new(Node::new("root", "Node", ()));
/// let player = scene.add_child(scene.root(), Node::new("player", "Sprite", ())).unwrap();
/// assert!(scene.is_live(player));
///
/// scene.remove(player).unwrap();
/// assert!(!scene.is_live(player));
/// ```
#[derive(Debug, Clone)]
pub struct SceneTree<D> {
    slots: Vec<Slot<D>>,
    free_list: Vec<usize>,
    root: NodeId,
    live: usize,
}

impl<D> SceneTree<D> {
    /// Create a tree holding only the given root node
    pub fn new(root: Node<D>) -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            live: 0,
        };
        tree.root = tree.allocate(Entry {
            node: root,
            parent: None,
            children: Vec::new(),
        });
        tree
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.live
    }

    /// True only when no node is live, which the protected root rules out
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Mutable access to a live node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<D>> {
        self.entry_mut(id).map(|e| &mut e.node)
    }

    /// Append `node` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, node: Node<D>) -> Result<NodeId, TreeError> {
        if !self.is_live(parent) {
            return Err(TreeError::StaleNode(parent));
        }

        let id = self.allocate(Entry {
            node,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(entry) = self.entry_mut(parent) {
            entry.children.push(id);
        }
        trace!("added {} under {}", id, parent);
        Ok(id)
    }

    /// Destroy a node and its entire subtree
    ///
    /// Returns the removed node itself; descendants are dropped. Every handle
    /// into the removed subtree becomes stale.
    pub fn remove(&mut self, id: NodeId) -> Result<Node<D>, TreeError> {
        if id == self.root {
            return Err(TreeError::RootNode);
        }
        let entry = self.free(id).ok_or(TreeError::StaleNode(id))?;

        if let Some(parent) = entry.parent.and_then(|p| self.entry_mut(p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut pending = entry.children;
        let mut removed = 1;
        while let Some(child) = pending.pop() {
            if let Some(child_entry) = self.free(child) {
                pending.extend(child_entry.children);
                removed += 1;
            }
        }
        trace!("removed {} ({} nodes)", id, removed);

        Ok(entry.node)
    }

    /// Move `id` (with its subtree) to the end of `new_parent`'s children
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::RootNode);
        }
        for handle in [id, new_parent] {
            if !self.is_live(handle) {
                return Err(TreeError::StaleNode(handle));
            }
        }
        if id == new_parent || self.is_ancestor_of(id, new_parent) {
            return Err(TreeError::CyclicReparent {
                node: id,
                parent: new_parent,
            });
        }

        let old_parent = self.parent(id);
        if let Some(old) = old_parent.and_then(|p| self.entry_mut(p)) {
            old.children.retain(|&c| c != id);
        }
        if let Some(entry) = self.entry_mut(new_parent) {
            entry.children.push(id);
        }
        if let Some(entry) = self.entry_mut(id) {
            entry.parent = Some(new_parent);
        }
        trace!("moved {} from {:?} to {}", id, old_parent, new_parent);
        Ok(())
    }

    fn allocate(&mut self, entry: Entry<D>) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.entry = Some(entry);
            return NodeId::new(index as u32, slot.generation);
        }

        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        NodeId::new((self.slots.len() - 1) as u32, 0)
    }

    /// Vacate a slot and bump its generation
    ///
    /// A slot whose generation is exhausted is retired instead of reused, so
    /// a handle can never come back to life.
    fn free(&mut self, id: NodeId) -> Option<Entry<D>> {
        let slot = self
            .slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation())?;
        let entry = slot.entry.take()?;
        match slot.generation.checked_add(1) {
            Some(generation) => {
                slot.generation = generation;
                self.free_list.push(id.index());
            }
            None => trace!("retiring slot {}", id.index()),
        }
        self.live -= 1;
        Some(entry)
    }

    fn entry(&self, id: NodeId) -> Option<&Entry<D>> {
        self.slots
            .get(id.index())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.entry.as_ref())
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry<D>> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.entry.as_mut())
    }
}

impl<D> Tree for SceneTree<D> {
    type NodeData = D;

    fn root(&self) -> NodeId {
        self.root
    }

    fn get(&self, id: NodeId) -> Option<&Node<D>> {
        self.entry(id).map(|e| &e.node)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id).and_then(|e| e.parent)
    }

    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.entry(id) {
            Some(entry) => Box::new(entry.children.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn node_count(&self) -> usize {
        self.live
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TraversalOrder, TreeTraversal};

    fn scene() -> SceneTree<u8> {
        SceneTree::new(Node::new("root", "Node", 0))
    }

    #[test]
    fn test_add_child_keeps_order() {
        let mut tree = scene();
        let root = tree.root();
        let a = tree.add_child(root, Node::new("a", "Node", 1)).unwrap();
        let b = tree.add_child(root, Node::new("b", "Node", 2)).unwrap();
        let c = tree.add_child(a, Node::new("c", "Node", 3)).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_remove_invalidates_subtree() {
        let mut tree = scene();
        let root = tree.root();
        let a = tree.add_child(root, Node::new("a", "Node", 1)).unwrap();
        let c = tree.add_child(a, Node::new("c", "Node", 3)).unwrap();
        let b = tree.add_child(root, Node::new("b", "Node", 2)).unwrap();

        let removed = tree.remove(a).unwrap();
        assert_eq!(removed.name, "a");
        assert!(!tree.is_live(a));
        assert!(!tree.is_live(c));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![b]);
        assert_eq!(tree.remove(a), Err(TreeError::StaleNode(a)));
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_handle() {
        let mut tree = scene();
        let root = tree.root();
        let old = tree.add_child(root, Node::new("old", "Node", 1)).unwrap();
        tree.remove(old).unwrap();

        let new = tree.add_child(root, Node::new("new", "Node", 2)).unwrap();
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(tree.get(old).is_none());
        assert_eq!(tree.name(new), Some("new"));
    }

    #[test]
    fn test_exhausted_slot_is_retired() {
        let mut tree = scene();
        let root = tree.root();
        let a = tree.add_child(root, Node::new("a", "Node", 1)).unwrap();
        tree.slots[a.index()].generation = u32::MAX;
        let last = NodeId::new(a.index() as u32, u32::MAX);

        tree.remove(last).unwrap();
        assert!(!tree.is_live(last));
        assert!(tree.free_list.is_empty());

        let b = tree.add_child(root, Node::new("b", "Node", 2)).unwrap();
        assert_ne!(b.index(), last.index());
        assert!(!tree.is_live(last));
        assert!(!tree.is_live(NodeId::new(a.index() as u32, 0)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_root_is_protected() {
        let mut tree = scene();
        let root = tree.root();
        assert_eq!(tree.remove(root), Err(TreeError::RootNode));
        assert!(!tree.is_empty());

        let a = tree.add_child(root, Node::new("a", "Node", 1)).unwrap();
        assert_eq!(tree.reparent(root, a), Err(TreeError::RootNode));
    }

    #[test]
    fn test_reparent() {
        let mut tree = scene();
        let root = tree.root();
        let a = tree.add_child(root, Node::new("a", "Node", 1)).unwrap();
        let b = tree.add_child(root, Node::new("b", "Node", 2)).unwrap();
        let c = tree.add_child(a, Node::new("c", "Node", 3)).unwrap();

        tree.reparent(a, b).unwrap();
        let order: Vec<_> = tree.walk(TraversalOrder::PreOrder).collect();
        assert_eq!(order, vec![root, b, a, c]);

        assert_eq!(
            tree.reparent(b, c),
            Err(TreeError::CyclicReparent { node: b, parent: c })
        );
        assert_eq!(
            tree.reparent(a, a),
            Err(TreeError::CyclicReparent { node: a, parent: a })
        );
    }

    #[test]
    fn test_get_mut() {
        let mut tree = scene();
        let root = tree.root();
        tree.get_mut(root).unwrap().data = 9;
        assert_eq!(tree.get(root).map(|n| n.data), Some(9));
    }
}
