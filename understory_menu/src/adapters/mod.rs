// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the menu foundation stays
//! usable with any host that implements [`MenuAdapter`](crate::MenuAdapter).
//!
//! ## Available Adapters
//!
//! - [`element_tree`] (`element_tree_adapter` feature): implements the menu
//!   adapter over an [`understory_element_tree::ElementTree`], a surface, and
//!   an item list. Used by the [`Menu`](crate::Menu) component.

#[cfg(feature = "element_tree_adapter")]
pub mod element_tree;
