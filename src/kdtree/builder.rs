use crate::error::Result;
use crate::kdtree::KDTree;
use crate::point::KDPoint;

/// A builder to create a balanced [`KDTree`].
///
/// Points are collected with [`add`][KDTreeBuilder::add] and the tree is built once in
/// [`finish`][KDTreeBuilder::finish]. This is equivalent to [`KDTree::build`] but lets the caller
/// learn the insertion index of each point while collecting them.
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<P: KDPoint> {
    points: Vec<P>,
}

impl<P: KDPoint> KDTreeBuilder<P> {
    /// Create a new builder with room for `num_items` points.
    ///
    /// `num_items` is only a capacity hint; more or fewer points may be added.
    pub fn new(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: P) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// The number of points added so far.
    pub fn num_items(&self) -> usize {
        self.points.len()
    }

    /// Consume this builder, performing the median split and generating a KDTree ready for
    /// queries.
    ///
    /// Fails if the added points do not all have the same number of coordinates.
    pub fn finish(self) -> Result<KDTree<P>> {
        KDTree::build(self.points)
    }

    /// Like [`finish`][KDTreeBuilder::finish], but sorts large partitions in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_finish(self) -> Result<KDTree<P>>
    where
        P: Send,
    {
        KDTree::par_build(self.points)
    }
}

impl<P: KDPoint> Default for KDTreeBuilder<P> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<P: KDPoint> Extend<P> for KDTreeBuilder<P> {
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}
