//! Document model
//!
//! - ElementNode: owned element subtree with text runs and child elements in
//!   source order, for building documents by hand
//! - SnapshotNode: one record of the flat JSON snapshot taken from a page
//! - Document: immutable arena tree with parent links, used for inference and
//!   XPath evaluation

pub mod element;
pub mod snapshot;
pub mod tree;

pub use element::{ElementNode, SnapshotChild};
pub use snapshot::SnapshotNode;
pub use tree::{Document, NodeId, NodeKind};
