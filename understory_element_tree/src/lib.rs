// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element_tree --heading-base-level=0

//! Understory Element Tree: a small, generational tree of tagged elements.
//!
//! This crate models just enough of a document to host widget behavior that is
//! written against class names, attributes, and parent links:
//!
//! - Every element has a lowercase tag name, an ordered set of classes, and
//!   string attributes.
//! - Elements form a tree; children are kept in document order.
//! - Checkbox inputs (`<input type="checkbox">`) carry a checked state.
//! - The tree tracks a single focused element.
//!
//! It does not do layout, styling, or rendering. This tree is the
//! interaction-facing view that behavior code queries and mutates.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_element_tree::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let list = tree.insert(None, "ul").unwrap();
//! tree.add_class(list, "list");
//! let item = tree.insert(Some(list), "li").unwrap();
//! tree.add_class(item, "list-item");
//!
//! assert_eq!(tree.parent_of(item), Some(list));
//! assert_eq!(tree.query_class(list, "list-item"), vec![item]);
//!
//! // Removing an element removes its subtree and invalidates the handles.
//! tree.remove(list);
//! assert!(!tree.is_alive(item));
//! ```
//!
//! Handles are generational: a stale [`ElementId`] never aliases a newer
//! element that happens to reuse the same slot, and every query treats stale
//! handles as absent.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::ElementTree;
pub use types::{ElementFlags, ElementId, TreeError};
