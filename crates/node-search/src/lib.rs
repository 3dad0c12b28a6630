//! Node Search Library
//!
//! Descendant, ancestor and child lookups over any [`scene_tree::Tree`].
//!
//! The two descendant searches walk the subtree below a root depth-first,
//! children in order, and yield matches lazily:
//!
//! - [`SearchExt::find_closest_descendants`] stops at the first match on each
//!   branch, so a match's own descendants are never reported.
//! - [`SearchExt::find_all_descendants`] reports every match in the subtree.
//!
//! These are meant for occasional walks (saving a level, collecting spawn
//! points) rather than per-frame queries.
//!
//! # Example
//!
//! ```
//! use node_search::prelude::*;
//! use scene_tree::{Node, SceneTree, Tree};
//!
//! let mut scene = SceneTree::new(Node::new("root", "Node", 0));
//! let crate_a = scene.add_child(scene.root(), Node::new("crate", "Prop", 10)).unwrap();
//! scene.add_child(crate_a, Node::new("coin", "Prop", 1)).unwrap();
//!
//! let props = Class::new("Prop");
//! let closest: Vec<_> = scene.find_closest_descendants(scene.root(), props.clone()).unwrap().collect();
//! let all: Vec<_> = scene.find_all_descendants(scene.root(), props).unwrap().collect();
//! assert_eq!(closest.len(), 1);
//! assert_eq!(all.len(), 2);
//! ```

mod category;
mod error;
mod search;

pub use category::{AnyNode, Category, Class, Classes, Refined};
pub use error::SearchError;
pub use search::{Descendants, SearchPolicy, SubtreeSearch};

use scene_tree::{NodeId, Tree};

/// Search operations available on every [`Tree`]
///
/// Starting nodes are taken as `impl Into<Option<NodeId>>`; passing `None`
/// fails with [`SearchError::NullRoot`] before anything is visited.
pub trait SearchExt: Tree {
    /// Shallowest matches below `root`, one per branch, in pre-order
    fn find_closest_descendants<C>(
        &self,
        root: impl Into<Option<NodeId>>,
        category: C,
    ) -> Result<Descendants<'_, Self, C>, SearchError>
    where
        C: Category<Self::NodeData>,
    {
        SubtreeSearch::new(root, category, SearchPolicy::Closest).map(|s| s.walk(self))
    }

    /// Every match below `root`, in pre-order
    fn find_all_descendants<C>(
        &self,
        root: impl Into<Option<NodeId>>,
        category: C,
    ) -> Result<Descendants<'_, Self, C>, SearchError>
    where
        C: Category<Self::NodeData>,
    {
        SubtreeSearch::new(root, category, SearchPolicy::All).map(|s| s.walk(self))
    }

    /// First match below `root` in pre-order
    fn find_first_descendant<C>(
        &self,
        root: impl Into<Option<NodeId>>,
        category: C,
    ) -> Result<Option<NodeId>, SearchError>
    where
        C: Category<Self::NodeData>,
    {
        Ok(self.find_closest_descendants(root, category)?.next())
    }

    /// Nearest ancestor of `node` that matches, starting with its parent
    fn find_ancestor<C>(
        &self,
        node: impl Into<Option<NodeId>>,
        category: C,
    ) -> Result<Option<NodeId>, SearchError>
    where
        C: Category<Self::NodeData>,
    {
        let node = node.into().ok_or(SearchError::NullRoot)?;
        let mut current = self.parent(node);
        while let Some(id) = current {
            match self.get(id) {
                Some(ancestor) if category.matches(ancestor) => return Ok(Some(id)),
                Some(_) => current = self.parent(id),
                None => break,
            }
        }
        Ok(None)
    }

    /// First direct child of `parent` that matches
    fn find_child<C>(
        &self,
        parent: impl Into<Option<NodeId>>,
        category: C,
    ) -> Result<Option<NodeId>, SearchError>
    where
        C: Category<Self::NodeData>,
    {
        let parent = parent.into().ok_or(SearchError::NullRoot)?;
        Ok(self
            .children(parent)
            .find(|&id| self.get(id).is_some_and(|child| category.matches(child))))
    }
}

impl<T: Tree + ?Sized> SearchExt for T {}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        AnyNode, Category, Class, Classes, SearchError, SearchExt, SearchPolicy, SubtreeSearch,
    };
}
