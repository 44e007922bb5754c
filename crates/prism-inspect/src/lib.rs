//! Property inspector tree.
//!
//! Any value implementing [`Inspect`] can be browsed as a tree of its
//! properties, fields and elements. Nodes expand lazily: the first expansion
//! shows a loading marker, discovers the children on a worker thread, and
//! swaps them in on the next [`PropertyTree::pump`].
//!
//! ```rust
//! use std::{sync::Arc, time::Duration};
//! use prism_core::Color;
//! use prism_inspect::*;
//!
//! let mut tree = PropertyTree::new();
//! tree.set_root_object(Some(Arc::new(Color(255, 0, 0, 255))));
//! let root = tree.root_nodes()[0];
//! tree.set_expanded(root, true);
//! assert!(tree.settle(Duration::from_secs(5)));
//!
//! let names: Vec<_> = tree
//!     .children(root)
//!     .into_iter()
//!     .map(|c| tree.node(c).unwrap().name().to_string())
//!     .collect();
//! assert_eq!(names, ["a", "b", "g", "hsv", "r"]);
//! ```

mod discover;
mod inspect;
mod tree;


pub use discover::*;
pub use inspect::*;
pub use tree::*;
