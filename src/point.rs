//! The capability a type must provide to be stored in a [`KDTree`][crate::kdtree::KDTree].

use num_traits::{Float, Zero};

use crate::r#type::IndexableNum;

/// A point with a fixed number of coordinates.
///
/// Only [`values`][KDPoint::values] must be implemented. Every point stored in one tree must
/// report the same number of values; that number is the dimensionality of the tree.
///
/// ```
/// use kd_index::KDPoint;
///
/// struct City {
///     name: &'static str,
///     location: [f64; 2],
/// }
///
/// impl KDPoint for City {
///     type Coord = f64;
///
///     fn values(&self) -> &[f64] {
///         &self.location
///     }
/// }
///
/// let a = City { name: "a", location: [0., 0.] };
/// let b = City { name: "b", location: [3., 4.] };
/// assert_eq!(a.squared_distance(&b), 25.);
/// assert_eq!(b.coordinate(3), 4.);
/// ```
pub trait KDPoint {
    /// The numeric type of each coordinate.
    type Coord: IndexableNum;

    /// The coordinates of this point, in dimension order.
    fn values(&self) -> &[Self::Coord];

    /// The number of coordinates of this point.
    #[inline]
    fn dimensions(&self) -> usize {
        self.values().len()
    }

    /// The coordinate on `dim`, taken modulo the dimensionality so any index is accepted.
    ///
    /// # Panics
    ///
    /// Panics if the point has no coordinates.
    #[inline]
    fn coordinate(&self, dim: usize) -> Self::Coord {
        let values = self.values();
        values[dim % values.len()]
    }

    /// Sum of the squared per-axis differences to `other`.
    ///
    /// This is monotonic with Euclidean distance, so it is used for every comparison. Take the
    /// square root of the result to get the true distance.
    #[inline]
    fn squared_distance(&self, other: &Self) -> Self::Coord {
        self.values()
            .iter()
            .zip(other.values())
            .fold(Self::Coord::zero(), |acc, (&a, &b)| {
                let d = a - b;
                acc + d * d
            })
    }

    /// Returns `true` if every coordinate pair differs by less than
    /// [`APPROX_EQ_TOLERANCE`][IndexableNum::APPROX_EQ_TOLERANCE].
    #[inline]
    fn approximately_equal(&self, other: &Self) -> bool {
        self.values()
            .iter()
            .zip(other.values())
            .all(|(&a, &b)| (a - b).abs() < Self::Coord::APPROX_EQ_TOLERANCE)
    }
}

impl<N: IndexableNum, const D: usize> KDPoint for [N; D] {
    type Coord = N;

    #[inline]
    fn values(&self) -> &[N] {
        self
    }
}

impl<N: IndexableNum> KDPoint for Vec<N> {
    type Coord = N;

    #[inline]
    fn values(&self) -> &[N] {
        self
    }
}

impl<N: IndexableNum> KDPoint for Box<[N]> {
    type Coord = N;

    #[inline]
    fn values(&self) -> &[N] {
        self
    }
}
