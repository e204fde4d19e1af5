use std::cmp::Ordering;

use num_traits::Zero;
use tinyvec::TinyVec;

use crate::kdtree::{KDTree, Node};
use crate::point::KDPoint;

/// A trait for searching and accessing data out of a KDTree.
///
/// Every query starts at [`root_id`][KDTreeIndex::root_id] splitting on
/// [`root_axis`][KDTreeIndex::root_axis] and moves one axis further at each level. All searches
/// use an explicit stack, so degenerate trees do not exhaust the call stack.
pub trait KDTreeIndex<P: KDPoint>: Sized {
    /// The node arena of this tree
    fn nodes(&self) -> &[Node<P>];

    /// Position of the root node in [`nodes`][KDTreeIndex::nodes], or `None` if empty
    fn root_id(&self) -> Option<usize>;

    /// The axis the root node splits on
    fn root_axis(&self) -> usize {
        0
    }

    /// The number of coordinates of the indexed points, or 0 for an empty tree
    fn dimensions(&self) -> usize;

    /// Find the indexed point closest to `query`.
    ///
    /// Returns `None` if the tree is empty or `query` has no coordinates. When several points are
    /// equally close, the one visited last wins.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    ///
    /// let tree = KDTree::build(vec![[4., 10.], [3., 11.], [2., 12.], [8., 4.]]).unwrap();
    /// assert_eq!(tree.nearest(&[2.2, 11.8]), Some(&[2., 12.]));
    /// ```
    fn nearest(&self, query: &P) -> Option<&P> {
        nearest_neighbor(self, query, None)
    }

    /// Find the indexed point closest to `query`, stopping early once any point within `radius`
    /// has been found.
    ///
    /// `radius` is a search cutoff, not a filter. If no point lies within `radius` the search
    /// runs to completion and the true nearest neighbor is returned even though it is farther
    /// away. If some point lies within `radius` the result is within `radius` but is not
    /// guaranteed to be the closest one. A negative radius disables the cutoff.
    ///
    /// Use [`nearest_strictly_within`][KDTreeIndex::nearest_strictly_within] to discard results
    /// beyond the radius.
    fn nearest_within(&self, query: &P, radius: P::Coord) -> Option<&P> {
        let cutoff = (radius >= P::Coord::zero()).then(|| radius * radius);
        nearest_neighbor(self, query, cutoff)
    }

    /// Find the indexed point closest to `query`, or `None` if it is farther than `radius`.
    fn nearest_strictly_within(&self, query: &P, radius: P::Coord) -> Option<&P> {
        if radius < P::Coord::zero() {
            return None;
        }
        let max_dist = radius * radius;
        self.nearest(query)
            .filter(|nearest| nearest.squared_distance(query) <= max_dist)
    }

    /// Find every indexed point within `radius` of `query`.
    ///
    /// The result is sorted by ascending distance to `query`; equally distant points keep the
    /// order in which they were visited. A negative radius or a query without coordinates matches
    /// nothing.
    fn within(&self, query: &P, radius: P::Coord) -> Vec<&P> {
        let nodes = self.nodes();
        let Some(root) = self.root_id() else {
            return vec![];
        };
        if radius < P::Coord::zero() || query.dimensions() == 0 {
            return vec![];
        }

        let dimensions = self.dimensions();
        let r2 = radius * radius;

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        stack.push((root, self.root_axis()));

        let mut result: Vec<(P::Coord, &P)> = vec![];

        while let Some((id, axis)) = stack.pop() {
            let node = &nodes[id];

            let dist = node.value.squared_distance(query);
            if dist <= r2 {
                result.push((dist, &node.value));
            }

            let delta = node.value.coordinate(axis) - query.coordinate(axis);
            let (near, far) = split_children(node, delta);
            let next_axis = (axis + 1) % dimensions;

            // a point on the far side is at least |delta| away
            if let Some(far) = far.filter(|_| delta * delta <= r2) {
                stack.push((far, next_axis));
            }
            if let Some(near) = near {
                stack.push((near, next_axis));
            }
        }

        result.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        result.into_iter().map(|(_, value)| value).collect()
    }

    /// Find the indexed point with the lowest coordinate on `dim`.
    ///
    /// `dim` is taken modulo the dimensionality. Below a node splitting on `dim` only the left
    /// side is searched, so the result relies on no right descendant being lower than its
    /// ancestor on that axis, which both [`KDTree::build`] and [`KDTree::insert`] maintain.
    fn smallest(&self, dim: usize) -> Option<&P> {
        let nodes = self.nodes();
        let root = self.root_id()?;
        let dimensions = self.dimensions();
        let target = dim % dimensions;

        let mut stack: TinyVec<[(usize, usize); 32]> = TinyVec::new();
        stack.push((root, self.root_axis()));

        let mut best = &nodes[root].value;
        while let Some((id, axis)) = stack.pop() {
            let node = &nodes[id];
            if node.value.coordinate(target) < best.coordinate(target) {
                best = &node.value;
            }

            let next_axis = (axis + 1) % dimensions;
            if let Some(left) = node.left {
                stack.push((left, next_axis));
            }
            if axis != target {
                if let Some(right) = node.right {
                    stack.push((right, next_axis));
                }
            }
        }

        Some(best)
    }
}

impl<P: KDPoint> KDTreeIndex<P> for KDTree<P> {
    fn nodes(&self) -> &[Node<P>] {
        &self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        self.root
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Order the children of `node` as (near, far) relative to a query, where `delta` is the node's
/// coordinate minus the query's on the node's axis.
#[inline]
fn split_children<P: KDPoint>(node: &Node<P>, delta: P::Coord) -> (Option<usize>, Option<usize>) {
    if delta > P::Coord::zero() {
        (node.left, node.right)
    } else {
        (node.right, node.left)
    }
}

/// Branch-and-bound nearest neighbor search.
///
/// The near side of each node is explored before the far side, and a far side is skipped once
/// its splitting plane is no closer than the current best. With a `cutoff` the search stops as
/// soon as the best squared distance drops to or below it.
fn nearest_neighbor<'a, P, T>(tree: &'a T, query: &P, cutoff: Option<P::Coord>) -> Option<&'a P>
where
    P: KDPoint,
    T: KDTreeIndex<P>,
{
    let nodes = tree.nodes();
    let root = tree.root_id()?;
    if query.dimensions() == 0 {
        return None;
    }
    let dimensions = tree.dimensions();

    // Entries carry the squared distance to the plane separating them from the query, or None
    // on the query's side.
    let mut stack: TinyVec<[(usize, usize, Option<P::Coord>); 32]> = TinyVec::new();
    stack.push((root, tree.root_axis(), None));

    let mut best = root;
    let mut best_dist = nodes[root].value.squared_distance(query);

    while let Some((id, axis, plane_dist)) = stack.pop() {
        if cutoff.is_some_and(|cutoff| best_dist <= cutoff) {
            break;
        }
        if plane_dist.is_some_and(|plane_dist| plane_dist >= best_dist) {
            continue;
        }

        let node = &nodes[id];
        let dist = node.value.squared_distance(query);
        if dist <= best_dist {
            best = id;
            best_dist = dist;
        }

        let delta = node.value.coordinate(axis) - query.coordinate(axis);
        let (near, far) = split_children(node, delta);
        let next_axis = (axis + 1) % dimensions;

        // Pushed first so the near side is popped first
        let plane_dist = delta * delta;
        if let Some(far) = far.filter(|_| plane_dist < best_dist) {
            stack.push((far, next_axis, Some(plane_dist)));
        }
        if let Some(near) = near {
            stack.push((near, next_axis, None));
        }
    }

    Some(&nodes[best].value)
}
