//! Scene Tree Library
//!
//! An owned, ordered hierarchy of named nodes addressed by generational
//! handles, plus the `Tree` abstraction other crates search against.
//!
//! # Core Concepts
//!
//! - **Tree**: Generic trait over any host hierarchy with liveness checks
//! - **Node**: A named, class-tagged element carrying user data
//! - **SceneTree**: Arena implementation whose removed handles go stale
//!
//! # Example
//!
//! ```
//! use scene_tree::prelude::*;
//!
//! let mut scene = SceneTree::new(Node::new("root", "Node", ()));
//! let level = scene.add_child(scene.root(), Node::new("level", "Node2D", ())).unwrap();
//! scene.add_child(level, Node::new("player", "Sprite", ())).unwrap();
//!
//! for id in scene.walk(TraversalOrder::PreOrder) {
//!     let node = scene.get(id).unwrap();
//!     println!("{:indent$}{}", "", node.name, indent = scene.depth(id) * 2);
//! }
//! ```

mod error;
mod node;
mod scene;
mod traits;

pub use error::TreeError;
pub use node::{ClassName, Node, NodeId};
pub use scene::SceneTree;
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ClassName, Node, NodeId, SceneTree, TraversalOrder, Tree, TreeError, TreeTraversal,
    };
}
