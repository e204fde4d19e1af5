use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// The points passed to a bulk build do not all report the same number of coordinates.
    #[error("Point {index} has {found} coordinates when expected {expected}.")]
    DimensionMismatch {
        /// The dimensionality of the first point
        expected: usize,
        /// The dimensionality of the offending point
        found: usize,
        /// Position of the offending point in the input
        index: usize,
    },

    /// The points passed to a bulk build have no coordinates at all.
    #[error("Points must have at least one coordinate.")]
    ZeroDimensions,
}

pub type Result<T> = std::result::Result<T, KDIndexError>;
