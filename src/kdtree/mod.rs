//! An implementation of a k-dimensional tree over arbitrary point types.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use node::Node;
pub use r#trait::KDTreeIndex;
pub use traversal::NodeRef;
