#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
mod r#type;

pub use error::{KDIndexError, Result};
pub use point::KDPoint;
pub use r#type::IndexableNum;
