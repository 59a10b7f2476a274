// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item list collaborator.

#[cfg(feature = "element_tree_adapter")]
use alloc::vec::Vec;

#[cfg(feature = "element_tree_adapter")]
use understory_element_tree::{ElementId, ElementTree};

#[cfg(feature = "element_tree_adapter")]
use crate::constants::css_classes;

/// A list controller that tracks the menu's selectable items.
///
/// The order of [`ItemList::elements`] defines the flattened item index used
/// throughout the menu.
pub trait ItemList {
    /// Element handle.
    type Element;

    /// Tracked items in index order.
    fn elements(&self) -> &[Self::Element];

    /// Release resources held by the list.
    fn destroy(&mut self);
}

/// Tracks the `list-item` descendants of a list root in document order.
///
/// Separators and other non-item children are skipped, and items inside
/// nested selection groups are flattened into the same index space.
#[cfg(feature = "element_tree_adapter")]
#[derive(Clone, Debug)]
pub struct ListController {
    root: ElementId,
    elements: Vec<ElementId>,
    destroyed: bool,
}

#[cfg(feature = "element_tree_adapter")]
impl ListController {
    /// Collect the items under `root`.
    pub fn new(tree: &ElementTree, root: ElementId) -> Self {
        Self {
            root,
            elements: tree.query_class(root, css_classes::LIST_ITEM_CLASS),
            destroyed: false,
        }
    }

    /// The list root.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Re-collect items after the tree changed.
    pub fn layout(&mut self, tree: &ElementTree) {
        if self.destroyed {
            return;
        }
        self.elements = tree.query_class(self.root, css_classes::LIST_ITEM_CLASS);
    }

    /// Replace the tracked items.
    pub fn set_elements(&mut self, elements: Vec<ElementId>) {
        self.elements = elements;
    }

    /// Returns `true` once [`ItemList::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(feature = "element_tree_adapter")]
impl ItemList for ListController {
    type Element = ElementId;

    fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    fn destroy(&mut self) {
        self.elements.clear();
        self.destroyed = true;
    }
}
