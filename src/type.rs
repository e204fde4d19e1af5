use std::fmt::Debug;

use num_traits::{Float, NumCast};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only floating point
/// coordinates are supported, because every query compares squared distances and the duplicate
/// check in [`KDTree::insert`][crate::kdtree::KDTree::insert] relies on a fractional tolerance.
pub trait IndexableNum:
    private::Sealed + Float + NumCast + Default + Debug + Send + Sync + 'static
{
    /// Two coordinates closer than this are considered the same when suppressing duplicate
    /// insertions.
    const APPROX_EQ_TOLERANCE: Self;
}

impl IndexableNum for f32 {
    const APPROX_EQ_TOLERANCE: Self = 1e-6;
}

impl IndexableNum for f64 {
    const APPROX_EQ_TOLERANCE: Self = 1e-6;
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
