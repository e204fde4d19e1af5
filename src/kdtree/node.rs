use std::cmp::Ordering;

use crate::error::{KDIndexError, Result};
use crate::point::KDPoint;

/// A single entry of a [`KDTree`][crate::kdtree::KDTree].
///
/// Nodes are stored in an arena owned by the tree and reference their children by position in
/// that arena. Each child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<P> {
    pub(crate) value: P,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<P> Node<P> {
    pub(crate) fn leaf(value: P) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The point held by this node.
    pub fn value(&self) -> &P {
        &self.value
    }
}

/// Check that every point reports the same number of coordinates, returning that number.
///
/// An empty slice has dimensionality 0.
pub(crate) fn validate_dimensions<P: KDPoint>(points: &[P]) -> Result<usize> {
    let Some(first) = points.first() else {
        return Ok(0);
    };

    let expected = first.dimensions();
    if expected == 0 {
        return Err(KDIndexError::ZeroDimensions);
    }

    match points
        .iter()
        .enumerate()
        .find(|(_, p)| p.dimensions() != expected)
    {
        Some((index, p)) => Err(KDIndexError::DimensionMismatch {
            expected,
            found: p.dimensions(),
            index,
        }),
        None => Ok(expected),
    }
}

/// Stable sort of `points` by their coordinate on `axis`.
///
/// NaN coordinates compare equal to everything.
pub(crate) fn sort_by_axis<P: KDPoint>(points: &mut [P], axis: usize) {
    points.sort_by(|a, b| compare_on_axis(a, b, axis));
}

#[inline]
pub(crate) fn compare_on_axis<P: KDPoint>(a: &P, b: &P, axis: usize) -> Ordering {
    a.coordinate(axis)
        .partial_cmp(&b.coordinate(axis))
        .unwrap_or(Ordering::Equal)
}

/// Recursively build a balanced subtree out of `points` into the `nodes` arena.
///
/// At each level the points are sorted on `axis` and the lower median becomes the node. Lower
/// items go left and the rest go right, both split on the next axis. Returns the arena position
/// of the subtree root.
pub(crate) fn build_recursive<P, S>(
    nodes: &mut Vec<Node<P>>,
    mut points: Vec<P>,
    axis: usize,
    dimensions: usize,
    sort: &S,
) -> Option<usize>
where
    P: KDPoint,
    S: Fn(&mut [P], usize),
{
    if points.is_empty() {
        return None;
    }

    sort(&mut points, axis);

    let m = points.len() / 2;
    let right = points.split_off(m + 1);
    let value = points.pop()?;
    let left = points;

    let id = nodes.len();
    nodes.push(Node::leaf(value));

    let next_axis = (axis + 1) % dimensions;
    let left_id = build_recursive(nodes, left, next_axis, dimensions, sort);
    let right_id = build_recursive(nodes, right, next_axis, dimensions, sort);

    let node = &mut nodes[id];
    node.left = left_id;
    node.right = right_id;

    Some(id)
}

/// Walk down from `root` and attach `value` as a new leaf.
///
/// Points strictly lower on a node's axis go left, everything else goes right. Returns `false`
/// without modifying the arena if a node on the path holds a point approximately equal to
/// `value`.
pub(crate) fn insert_below<P: KDPoint>(
    nodes: &mut Vec<Node<P>>,
    root: usize,
    value: P,
    dimensions: usize,
) -> bool {
    let mut current = root;
    let mut axis = 0;

    loop {
        let node = &nodes[current];
        if value.approximately_equal(&node.value) {
            return false;
        }

        let go_left = value.coordinate(axis) < node.value.coordinate(axis);
        let child = if go_left { node.left } else { node.right };

        match child {
            Some(child) => {
                current = child;
                axis = (axis + 1) % dimensions;
            }
            None => {
                let id = nodes.len();
                nodes.push(Node::leaf(value));
                let parent = &mut nodes[current];
                if go_left {
                    parent.left = Some(id);
                } else {
                    parent.right = Some(id);
                }
                return true;
            }
        }
    }
}
