// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu adapter over Understory Element Tree.
//!
//! ## Feature
//!
//! Enable with `element_tree_adapter`.
//!
//! ## Notes
//!
//! Item indices are positions in the list collaborator's
//! [`elements`](crate::ItemList::elements). When the list is absent, the menu
//! has no items: index lookups return `None` and index-addressed mutations do
//! nothing.
//!
//! Selected notifications are queued rather than dispatched; hosts drain them
//! with [`TreeAdapter::take_selected`].

use alloc::vec::Vec;

use understory_element_tree::{ElementId, ElementTree};

use crate::adapter::MenuAdapter;
use crate::constants::{css_classes, strings};
use crate::list::{ItemList, ListController};
use crate::surface::MenuSurface;
use crate::types::SelectedDetail;

bitflags::bitflags! {
    /// Root-level listeners currently attached.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Keydown events reach the foundation.
        const KEYDOWN = 0b0000_0001;
        /// Click events reach the foundation.
        const CLICK   = 0b0000_0010;
    }
}

/// A selected notification emitted on the menu root.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectedEvent {
    /// Element the notification was emitted on (the menu root).
    pub target: ElementId,
    /// Position of the selected item.
    pub index: usize,
    /// The selected item, if it is still tracked.
    pub item: Option<ElementId>,
}

impl SelectedEvent {
    /// Notification name.
    pub fn name(&self) -> &'static str {
        strings::SELECTED_EVENT
    }
}

/// [`MenuAdapter`] over an element tree, a surface, and an optional item list.
pub struct TreeAdapter<S, L> {
    tree: ElementTree,
    root: ElementId,
    surface: S,
    list: Option<L>,
    listeners: Listeners,
    selected: Vec<SelectedEvent>,
    parts_destroyed: bool,
}

impl<S, L> core::fmt::Debug for TreeAdapter<S, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeAdapter")
            .field("tree", &self.tree)
            .field("root", &self.root)
            .field("has_list", &self.list.is_some())
            .field("listeners", &self.listeners)
            .field("queued_selected", &self.selected.len())
            .finish_non_exhaustive()
    }
}

impl<S, L> TreeAdapter<S, L>
where
    S: MenuSurface<Element = ElementId>,
    L: ItemList<Element = ElementId>,
{
    /// Create an adapter for the menu rooted at `root`.
    pub fn new(tree: ElementTree, root: ElementId, surface: S, list: Option<L>) -> Self {
        Self {
            tree,
            root,
            surface,
            list,
            listeners: Listeners::empty(),
            selected: Vec::new(),
            parts_destroyed: false,
        }
    }

    /// The element tree.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// The element tree, mutably.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    /// The menu root.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The item list, if one was instantiated.
    pub fn list(&self) -> Option<&L> {
        self.list.as_ref()
    }

    /// The item list, mutably.
    pub fn list_mut(&mut self) -> Option<&mut L> {
        self.list.as_mut()
    }

    /// Tracked items in index order; empty without a list.
    pub fn items(&self) -> &[ElementId] {
        self.list.as_ref().map(|l| l.elements()).unwrap_or(&[])
    }

    /// Listeners currently attached.
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Open the surface and attach the root listeners.
    pub fn open_surface(&mut self) {
        self.surface.show();
        self.tree.add_class(self.root, css_classes::SURFACE_OPEN);
        self.listeners = Listeners::KEYDOWN | Listeners::CLICK;
    }

    /// Drain queued selected notifications.
    pub fn take_selected(&mut self) -> Vec<SelectedEvent> {
        core::mem::take(&mut self.selected)
    }

    /// Destroy the surface and the list, if present. Runs at most once.
    pub fn destroy_parts(&mut self) {
        self.listeners = Listeners::empty();
        if self.parts_destroyed {
            return;
        }
        self.parts_destroyed = true;
        self.surface.destroy();
        if let Some(mut list) = self.list.take() {
            list.destroy();
        }
    }

    fn item_at(&self, index: usize) -> Option<ElementId> {
        self.items().get(index).copied()
    }
}

impl<S> TreeAdapter<S, ListController>
where
    S: MenuSurface<Element = ElementId>,
{
    /// Re-collect the list's items from the tree. No-op without a list.
    pub fn layout(&mut self) {
        if let Some(list) = self.list.as_mut() {
            list.layout(&self.tree);
        }
    }
}

impl<S, L> MenuAdapter for TreeAdapter<S, L>
where
    S: MenuSurface<Element = ElementId>,
    L: ItemList<Element = ElementId>,
{
    type Element = ElementId;

    fn add_class_to_element_at_index(&mut self, index: usize, class_name: &str) {
        if let Some(item) = self.item_at(index) {
            self.tree.add_class(item, class_name);
        }
    }

    fn remove_class_from_element_at_index(&mut self, index: usize, class_name: &str) {
        if let Some(item) = self.item_at(index) {
            self.tree.remove_class(item, class_name);
        }
    }

    fn add_attribute_to_element_at_index(&mut self, index: usize, name: &str, value: &str) {
        if let Some(item) = self.item_at(index) {
            self.tree.set_attribute(item, name, value);
        }
    }

    fn remove_attribute_from_element_at_index(&mut self, index: usize, name: &str) {
        if let Some(item) = self.item_at(index) {
            self.tree.remove_attribute(item, name);
        }
    }

    fn element_contains_class(&self, element: ElementId, class_name: &str) -> bool {
        self.tree.has_class(element, class_name)
    }

    fn close_surface(&mut self) {
        self.surface.hide();
        self.tree.remove_class(self.root, css_classes::SURFACE_OPEN);
        self.listeners = Listeners::empty();
    }

    fn element_index(&self, element: ElementId) -> Option<usize> {
        self.items().iter().position(|&e| e == element)
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId> {
        self.tree.parent_of(element)
    }

    fn selected_element_index(&self, group: ElementId) -> Option<usize> {
        let selected = self
            .tree
            .query_first_class(group, css_classes::MENU_SELECTED_LIST_ITEM)?;
        self.element_index(selected)
    }

    fn notify_selected(&mut self, detail: SelectedDetail) {
        self.selected.push(SelectedEvent {
            target: self.root,
            index: detail.index,
            item: self.item_at(detail.index),
        });
    }

    fn toggle_checkbox(&mut self, element: ElementId) {
        if let Some(checkbox) = self.tree.first_checkbox(element) {
            let checked = self.tree.checked(checkbox).unwrap_or(false);
            self.tree.set_checked(checkbox, !checked);
        }
    }
}
