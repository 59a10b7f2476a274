// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: headless menu behavior.
//!
//! This crate implements the interaction contract of a dropdown menu without
//! rendering anything:
//!
//! - **Activation**: `Space`/`Enter` and clicks activate the list item under the
//!   event target, `Tab` closes the menu, every other key is ignored.
//! - **Selection groups**: items inside a `menu__selection-group` behave like
//!   radio buttons. The previous item's marker is cleared and the new item's
//!   marker is set once the surface's closing transition has elapsed, so the
//!   change never flashes on screen.
//! - **Surface coordination**: activating an item closes the surface and emits a
//!   selected notification carrying the item's index.
//!
//! The core is [`MenuFoundation`], a small state machine driven through the
//! [`MenuAdapter`] capability trait. It never fails: "not found" answers from
//! the adapter are `None`, and the foundation simply does less.
//!
//! Time is supplied by the host. Every [`MenuEvent`] carries a millisecond
//! timestamp, and deferred selection-group updates are applied when the host
//! calls [`MenuFoundation::advance`]. Tearing the foundation down with
//! [`MenuFoundation::destroy`] drops anything still pending.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_element_tree::ElementTree;
//! use understory_menu::{Key, Menu, css_classes};
//!
//! // surface > list > group > [small, large (selected)]
//! let mut tree = ElementTree::new();
//! let root = tree.insert(None, "div").unwrap();
//! let list = tree.insert(Some(root), "ul").unwrap();
//! tree.add_class(list, css_classes::LIST_CLASS);
//! let group = tree.insert(Some(list), "ul").unwrap();
//! tree.add_class(group, css_classes::MENU_SELECTION_GROUP);
//! let small = tree.insert(Some(group), "li").unwrap();
//! let large = tree.insert(Some(group), "li").unwrap();
//! for item in [small, large] {
//!     tree.add_class(item, css_classes::LIST_ITEM_CLASS);
//! }
//! tree.add_class(large, css_classes::MENU_SELECTED_LIST_ITEM);
//!
//! let mut menu = Menu::attach(tree, root);
//! menu.show();
//!
//! // Enter on the first item selects it and closes the menu right away…
//! assert_eq!(menu.key_down(Key::Enter, small, 1_000), Some(0));
//! assert!(!menu.is_open());
//! assert_eq!(menu.take_selected()[0].index, 0);
//!
//! // …while the markers follow once the closing transition is over.
//! menu.advance(1_000 + understory_menu::numbers::TRANSITION_CLOSE_DURATION);
//! assert!(menu.tree().has_class(small, css_classes::MENU_SELECTED_LIST_ITEM));
//! assert!(!menu.tree().has_class(large, css_classes::MENU_SELECTED_LIST_ITEM));
//! ```
//!
//! ## Bringing your own host
//!
//! Hosts that already have a document model implement [`MenuAdapter`] for it
//! and drive [`MenuFoundation`] directly; the [`Menu`] component and its
//! [`adapters::element_tree`] adapter are one such host.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `element_tree_adapter` (default): enables [`adapters::element_tree`] and the [`Menu`]
//!   component on top of `understory_element_tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
pub mod adapters;
mod constants;
mod foundation;
mod list;
#[cfg(feature = "element_tree_adapter")]
mod menu;
mod surface;
mod types;

pub use adapter::MenuAdapter;
pub use constants::{css_classes, numbers, strings};
pub use foundation::{GroupUpdate, MenuFoundation};
#[cfg(feature = "element_tree_adapter")]
pub use list::ListController;
pub use list::ItemList;
#[cfg(feature = "element_tree_adapter")]
pub use menu::Menu;
pub use surface::{BasicSurface, Corner, MenuSurface};
pub use types::{Key, MenuConfig, MenuEvent, SelectedDetail, TargetTag};
