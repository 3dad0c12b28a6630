//! Core node types for the scene tree

use derive_more::{Display, From};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generational handle to a node within a [`SceneTree`](crate::SceneTree)
///
/// The first field is the arena slot, the second the generation the slot had
/// when the node was created. Once a node is removed its slot generation is
/// bumped, so every handle still pointing at it stops being live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(u32, u32);

impl NodeId {
    /// Create a handle from a slot index and generation
    pub const fn new(index: u32, generation: u32) -> Self {
        NodeId(index, generation)
    }

    /// Arena slot of this handle
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Generation this handle was issued with
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@{})", self.0, self.1)
    }
}

/// The category tag of a node (e.g. `Sprite`, `Timer`, `Camera`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        ClassName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        ClassName(name.to_string())
    }
}

impl PartialEq<str> for ClassName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ClassName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single node in the scene
///
/// Generic over the data type `D` which carries whatever per-node state the
/// host attaches (transforms, save-game payloads, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<D> {
    /// The node's name (unique among siblings by convention only)
    pub name: String,
    /// Category tag used by class filters
    pub class: ClassName,
    /// User-defined data associated with this node
    pub data: D,
}

impl<D> Node<D> {
    /// Create a new node
    pub fn new(name: impl Into<String>, class: impl Into<ClassName>, data: D) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            data,
        }
    }

    /// Returns true if this node carries the given class tag
    pub fn is_class(&self, class: &str) -> bool {
        self.class == class
    }
}

impl<D: Default> Node<D> {
    /// Create a new node with default data
    pub fn with_default(name: impl Into<String>, class: impl Into<ClassName>) -> Self {
        Self::new(name, class, D::default())
    }
}

impl<D: fmt::Display> fmt::Display for Node<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.class, self.data)
    }
}
