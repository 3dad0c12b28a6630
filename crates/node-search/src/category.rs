//! Node filters used by the subtree searches

use scene_tree::{ClassName, Node};

/// Decides whether a node belongs to the set a search is looking for
///
/// Implemented by the provided filters ([`AnyNode`], [`Class`], [`Classes`]),
/// by [`Refined`] and by any closure `Fn(&Node<D>) -> bool`.
pub trait Category<D> {
    fn matches(&self, node: &Node<D>) -> bool;

    /// Narrow this category with an extra predicate
    ///
    /// The predicate only sees nodes that already passed this category.
    fn refine<P>(self, predicate: P) -> Refined<Self, P>
    where
        Self: Sized,
        P: Fn(&Node<D>) -> bool,
    {
        Refined {
            category: self,
            predicate,
        }
    }
}

impl<D, F> Category<D> for F
where
    F: Fn(&Node<D>) -> bool,
{
    fn matches(&self, node: &Node<D>) -> bool {
        self(node)
    }
}

/// Matches every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyNode;

impl<D> Category<D> for AnyNode {
    fn matches(&self, _node: &Node<D>) -> bool {
        true
    }
}

/// Matches nodes carrying one class tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class(ClassName);

impl Class {
    pub fn new(class: impl Into<ClassName>) -> Self {
        Class(class.into())
    }
}

impl<D> Category<D> for Class {
    fn matches(&self, node: &Node<D>) -> bool {
        node.class == self.0
    }
}

/// Matches nodes carrying any of several class tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classes(Vec<ClassName>);

impl Classes {
    pub fn new<I>(classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ClassName>,
    {
        Classes(classes.into_iter().map(Into::into).collect())
    }
}

impl<D> Category<D> for Classes {
    fn matches(&self, node: &Node<D>) -> bool {
        self.0.contains(&node.class)
    }
}

/// A category narrowed by a caller-supplied predicate, see [`Category::refine`]
#[derive(Debug, Clone)]
pub struct Refined<C, P> {
    category: C,
    predicate: P,
}

impl<D, C, P> Category<D> for Refined<C, P>
where
    C: Category<D>,
    P: Fn(&Node<D>) -> bool,
{
    fn matches(&self, node: &Node<D>) -> bool {
        self.category.matches(node) && (self.predicate)(node)
    }
}
