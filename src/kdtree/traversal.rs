//! Utilities to traverse the KDTree structure.

use tinyvec::TinyVec;

use crate::kdtree::{KDTreeIndex, Node};
use crate::point::KDPoint;

/// A borrowed view onto one node of a [`KDTree`][crate::kdtree::KDTree] and the subtree below
/// it.
///
/// A `NodeRef` knows the axis its node splits on, so it can be queried through
/// [`KDTreeIndex`] exactly like a whole tree.
#[derive(Debug)]
pub struct NodeRef<'a, P> {
    nodes: &'a [Node<P>],
    id: usize,

    /// The axis this node splits its children over.
    axis: usize,
    dimensions: usize,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<'a, P: KDPoint> NodeRef<'a, P> {
    pub(crate) fn new(nodes: &'a [Node<P>], id: usize, axis: usize, dimensions: usize) -> Self {
        Self {
            nodes,
            id,
            axis,
            dimensions,
        }
    }

    #[inline]
    fn node(&self) -> &'a Node<P> {
        &self.nodes[self.id]
    }

    #[inline]
    fn child(&self, id: Option<usize>) -> Option<Self> {
        id.map(|id| Self::new(self.nodes, id, (self.axis + 1) % self.dimensions, self.dimensions))
    }

    /// The point held by this node.
    pub fn value(&self) -> &'a P {
        &self.node().value
    }

    /// The axis this node splits on. The root splits on 0 and each level below on the next one.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The child holding points lower than this node on [`axis`][NodeRef::axis].
    pub fn left(&self) -> Option<Self> {
        self.child(self.node().left)
    }

    /// The child holding points not lower than this node on [`axis`][NodeRef::axis].
    pub fn right(&self) -> Option<Self> {
        self.child(self.node().right)
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }

    /// The number of points in the subtree rooted at this node, including itself.
    pub fn size(&self) -> usize {
        let mut stack: TinyVec<[usize; 32]> = TinyVec::new();
        stack.push(self.id);

        let mut count = 0;
        while let Some(id) = stack.pop() {
            count += 1;
            let node = &self.nodes[id];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        count
    }

    /// The number of levels below and including this node.
    pub fn depth(&self) -> usize {
        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        stack.push((self.id, 1));

        let mut deepest = 0;
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, level + 1)));
            stack.extend(node.right.map(|child| (child, level + 1)));
        }
        deepest
    }
}

impl<P: KDPoint> KDTreeIndex<P> for NodeRef<'_, P> {
    fn nodes(&self) -> &[Node<P>] {
        self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        Some(self.id)
    }

    fn root_axis(&self) -> usize {
        self.axis
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
