#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;

use crate::error::{KDIndexError, Result};
use crate::kdtree::node::{build_recursive, insert_below, sort_by_axis, validate_dimensions};
#[cfg(feature = "rayon")]
use crate::kdtree::node::compare_on_axis;
use crate::kdtree::{Node, NodeRef};
use crate::point::KDPoint;

/// Partitions at least this large are sorted on the rayon thread pool by
/// [`KDTree::par_build`].
#[cfg(feature = "rayon")]
const PARALLEL_SORT_THRESHOLD: usize = 4096;

/// An owned k-dimensional tree.
///
/// Created balanced from a collection via [`KDTree::build`] (or
/// [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]), or grown one point at a time with
/// [`KDTree::insert`]. Queries live on the [`KDTreeIndex`][crate::kdtree::KDTreeIndex] trait.
///
/// The tree never checks points inserted after construction against its dimensionality, and
/// mutating a point's coordinates after it was indexed silently breaks every query.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<P> {
    pub(crate) nodes: Vec<Node<P>>,
    pub(crate) root: Option<usize>,
    pub(crate) dimensions: usize,
}

impl<P: KDPoint> KDTree<P> {
    /// Create an empty tree. Its dimensionality is set by the first inserted point.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            dimensions: 0,
        }
    }

    /// Build a balanced tree from a collection of points.
    ///
    /// An empty collection gives an empty tree. Fails with
    /// [`DimensionMismatch`][KDIndexError::DimensionMismatch] if the points do not all have the
    /// same number of coordinates; in that case nothing is built.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree = KDTree::build(vec![[1., 9.], [3., 6.], [0., 3.], [5., 1.]]).unwrap();
    /// assert_eq!(tree.nearest(&[4., 2.]), Some(&[5., 1.]));
    /// ```
    pub fn build(points: impl IntoIterator<Item = P>) -> Result<Self> {
        Self::build_with(points.into_iter().collect(), &sort_by_axis::<P>)
    }

    /// Like [`build`][KDTree::build], but sorts large partitions on the rayon thread pool.
    ///
    /// The resulting tree is identical to the one built sequentially.
    #[cfg(feature = "rayon")]
    pub fn par_build(points: impl IntoIterator<Item = P>) -> Result<Self>
    where
        P: Send,
    {
        let sort = |points: &mut [P], axis: usize| {
            if points.len() >= PARALLEL_SORT_THRESHOLD {
                points.par_sort_by(|a, b| compare_on_axis(a, b, axis));
            } else {
                sort_by_axis(points, axis);
            }
        };
        Self::build_with(points.into_iter().collect(), &sort)
    }

    fn build_with<S>(points: Vec<P>, sort: &S) -> Result<Self>
    where
        S: Fn(&mut [P], usize),
    {
        let dimensions = validate_dimensions(&points)?;
        let num_items = points.len();

        let mut nodes = Vec::with_capacity(num_items);
        let root = build_recursive(&mut nodes, points, 0, dimensions.max(1), sort);

        #[cfg(feature = "log")]
        log::debug!(
            "built kd-tree with {} points in {} dimensions",
            num_items,
            dimensions
        );

        Ok(Self {
            nodes,
            root,
            dimensions,
        })
    }

    /// Insert a single point without rebalancing.
    ///
    /// Returns `false` and leaves the tree unchanged if a point approximately equal to `point`
    /// (every coordinate within `1e-6`) is met on the way down. Inserting points in sorted order
    /// degrades the tree into a list. A point without coordinates is never inserted.
    pub fn insert(&mut self, point: P) -> bool {
        if point.dimensions() == 0 {
            #[cfg(feature = "log")]
            log::trace!("skipped point without coordinates on insert");

            return false;
        }

        let Some(root) = self.root else {
            self.dimensions = point.dimensions();
            self.nodes.push(Node::leaf(point));
            self.root = Some(self.nodes.len() - 1);

            #[cfg(feature = "log")]
            log::trace!("planted kd-tree root in {} dimensions", self.dimensions);

            return true;
        };

        let inserted = insert_below(&mut self.nodes, root, point, self.dimensions);

        #[cfg(feature = "log")]
        if !inserted {
            log::trace!("skipped duplicate point on insert");
        }

        inserted
    }

    /// The number of points in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Option<NodeRef<'_, P>> {
        self.root
            .map(|id| NodeRef::new(&self.nodes, id, 0, self.dimensions))
    }

    /// Iterate over all indexed points in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &P> + '_ {
        self.nodes.iter().map(|node| &node.value)
    }

    /// Consume the tree, returning its points in no particular order.
    pub fn into_points(self) -> Vec<P> {
        self.nodes.into_iter().map(|node| node.value).collect()
    }
}

impl<P: KDPoint> Default for KDTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: KDPoint> TryFrom<Vec<P>> for KDTree<P> {
    type Error = KDIndexError;

    fn try_from(points: Vec<P>) -> Result<Self> {
        Self::build(points)
    }
}

impl<P: KDPoint> Extend<P> for KDTree<P> {
    /// Insert every point in turn, as with [`KDTree::insert`].
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        for point in iter {
            self.insert(point);
        }
    }
}
