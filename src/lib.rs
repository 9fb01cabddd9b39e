//! A height-balanced binary search tree (an [AVL tree]) storing an ordered set
//! of unique keys.
//!
//! Every node caches the height of the subtree rooted at it, and after each
//! insertion or removal the tree is rotated so that the heights of the two
//! subtrees of any node never differ by more than one. This bounds the tree
//! height to `O(log n)`, and with it the cost of [`AvlTree::insert()`],
//! [`AvlTree::search()`] and [`AvlTree::remove()`].
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut t = AvlTree::new();
//!
//! // Inserting in ascending order triggers a left rotation.
//! for key in [10, 20, 30] {
//!     assert!(t.insert(key));
//! }
//!
//! // Duplicate keys are ignored.
//! assert!(!t.insert(20));
//!
//! let root = t.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(t.height(), 2);
//!
//! assert!(t.contains(&30));
//! assert!(t.remove(&30));
//! assert!(t.search(&30).is_none());
//! ```
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations, missing_docs, clippy::todo)]

mod error;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use node::Node;
pub use tree::*;
