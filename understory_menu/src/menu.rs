// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu component: the foundation wired to an element tree, a surface, and a list.

use alloc::vec::Vec;

use kurbo::Insets;
use understory_element_tree::{ElementId, ElementTree};

use crate::adapter::MenuAdapter;
use crate::adapters::element_tree::{Listeners, SelectedEvent, TreeAdapter};
use crate::constants::css_classes;
use crate::foundation::MenuFoundation;
use crate::list::{ItemList, ListController};
use crate::surface::{BasicSurface, Corner, MenuSurface};
use crate::types::{Key, MenuConfig, MenuEvent, TargetTag};

/// A menu attached to a subtree of an [`ElementTree`].
///
/// ## Usage
///
/// - Build with [`Menu::attach`] to get a [`BasicSurface`] and a
///   [`ListController`] over the first `list` element under the root, or with
///   [`Menu::with_parts`] to supply your own collaborators.
/// - [`Menu::show`] opens the surface and starts routing keydown and click
///   events; [`Menu::hide`] (or any close requested by the foundation) stops
///   routing them.
/// - Feed input through [`Menu::key_down`], [`Menu::click`], or
///   [`Menu::handle_event`], and call [`Menu::advance`] as time passes so
///   selection-group markers settle.
/// - Drain selected notifications with [`Menu::take_selected`].
pub struct Menu<S = BasicSurface<ElementId>, L = ListController>
where
    S: MenuSurface<Element = ElementId>,
    L: ItemList<Element = ElementId>,
{
    foundation: MenuFoundation<TreeAdapter<S, L>>,
}

impl<S, L> core::fmt::Debug for Menu<S, L>
where
    S: MenuSurface<Element = ElementId>,
    L: ItemList<Element = ElementId>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Menu")
            .field("foundation", &self.foundation)
            .finish()
    }
}

impl Menu {
    /// Attach a menu to `root` with the default collaborators.
    ///
    /// The list controller is only created when a `list` element exists under
    /// `root`; without one the menu has no items.
    pub fn attach(tree: ElementTree, root: ElementId) -> Self {
        let list = tree
            .query_first_class(root, css_classes::LIST_CLASS)
            .map(|list_root| ListController::new(&tree, list_root));
        if list.is_none() {
            tracing::debug!(?root, "menu attached without a list");
        }
        Self::with_parts(tree, root, BasicSurface::default(), list)
    }
}

impl<S> Menu<S, ListController>
where
    S: MenuSurface<Element = ElementId>,
{
    /// Re-collect the tracked items after the tree changed.
    ///
    /// Call this after inserting or removing items through [`Menu::tree_mut`];
    /// indices reported afterwards follow the new document order.
    pub fn layout(&mut self) {
        self.foundation.adapter_mut().layout();
    }
}

impl<S, L> Menu<S, L>
where
    S: MenuSurface<Element = ElementId>,
    L: ItemList<Element = ElementId>,
{
    /// Attach a menu to `root` with explicit collaborators.
    pub fn with_parts(tree: ElementTree, root: ElementId, surface: S, list: Option<L>) -> Self {
        Self::with_parts_and_config(tree, root, surface, list, MenuConfig::default())
    }

    /// Attach a menu with explicit collaborators and configuration.
    pub fn with_parts_and_config(
        tree: ElementTree,
        root: ElementId,
        surface: S,
        list: Option<L>,
        config: MenuConfig,
    ) -> Self {
        let adapter = TreeAdapter::new(tree, root, surface, list);
        Self {
            foundation: MenuFoundation::with_config(adapter, config),
        }
    }

    /// The behavior core.
    pub fn foundation(&self) -> &MenuFoundation<TreeAdapter<S, L>> {
        &self.foundation
    }

    /// The element tree.
    pub fn tree(&self) -> &ElementTree {
        self.adapter().tree()
    }

    /// The element tree, mutably.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        self.foundation.adapter_mut().tree_mut()
    }

    /// The menu root.
    pub fn root(&self) -> ElementId {
        self.adapter().root()
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        self.adapter().surface()
    }

    /// The item list, if one was instantiated.
    pub fn list(&self) -> Option<&L> {
        self.adapter().list()
    }

    /// Returns `true` while the surface is open.
    pub fn is_open(&self) -> bool {
        self.surface().is_open()
    }

    /// Open or close the menu.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Open the menu, start routing input, and focus the first item if there is one.
    pub fn show(&mut self) {
        self.foundation.adapter_mut().open_surface();
        if let Some(first) = self.items().first().copied() {
            self.tree_mut().focus(first);
        }
    }

    /// Close the menu and stop routing input.
    pub fn hide(&mut self) {
        self.foundation.adapter_mut().close_surface();
    }

    /// Set the anchor corner.
    pub fn set_anchor_corner(&mut self, corner: Corner) {
        self.surface_mut().set_anchor_corner(corner);
    }

    /// Set the anchor margin.
    pub fn set_anchor_margin(&mut self, margin: Insets) {
        self.surface_mut().set_anchor_margin(margin);
    }

    /// Returns `true` if open/close animations are skipped.
    pub fn quick_open(&self) -> bool {
        self.surface().quick_open()
    }

    /// Skip open/close animations.
    pub fn set_quick_open(&mut self, quick_open: bool) {
        self.surface_mut().set_quick_open(quick_open);
    }

    /// Use fixed positioning for the surface.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.surface_mut().set_fixed_position(fixed);
    }

    /// Move the surface to the document root.
    pub fn hoist_menu_to_body(&mut self) {
        self.surface_mut().hoist_menu_to_body();
    }

    /// Declare that the host has hoisted the surface.
    pub fn set_is_hoisted(&mut self, hoisted: bool) {
        self.surface_mut().set_is_hoisted(hoisted);
    }

    /// Set the element the surface is positioned against.
    pub fn set_anchor_element(&mut self, anchor: Option<ElementId>) {
        self.surface_mut().set_anchor_element(anchor);
    }

    /// All items in index order.
    pub fn items(&self) -> &[ElementId] {
        self.adapter().items()
    }

    /// The item at `index`, or `None` when out of range.
    pub fn option_by_index(&self, index: usize) -> Option<ElementId> {
        self.items().get(index).copied()
    }

    /// Listeners currently attached to the root.
    pub fn listeners(&self) -> Listeners {
        self.adapter().listeners()
    }

    /// Route a keydown on `target`. The target's tag is read from the tree.
    pub fn key_down(&mut self, key: Key, target: ElementId, time: u64) -> Option<usize> {
        let mut event = MenuEvent::key_down(key, target, time).with_target_tag(self.tag_of(target));
        self.handle_event(&mut event)
    }

    /// Route a click on `target`. The target's tag is read from the tree.
    pub fn click(&mut self, target: ElementId, time: u64) -> Option<usize> {
        let mut event = MenuEvent::click(target, time).with_target_tag(self.tag_of(target));
        self.handle_event(&mut event)
    }

    /// Route an event to the foundation if its listener is attached.
    ///
    /// When an item is activated with its default action prevented, a checkbox
    /// inside the item is toggled. Activations that keep their default action
    /// (the target is an input) leave the checkbox to the host.
    ///
    /// Returns the index reported as selected, if any.
    pub fn handle_event(&mut self, event: &mut MenuEvent<ElementId>) -> Option<usize> {
        let listeners = self.listeners();
        let index = if event.is_click() {
            if !listeners.contains(Listeners::CLICK) {
                return None;
            }
            self.foundation.handle_click(event)?
        } else {
            if !listeners.contains(Listeners::KEYDOWN) {
                return None;
            }
            self.foundation.handle_keydown(event)?
        };

        if event.default_prevented()
            && let Some(item) = self.option_by_index(index)
            && self.tree().first_checkbox(item).is_some()
        {
            self.foundation.adapter_mut().toggle_checkbox(item);
        }
        Some(index)
    }

    /// Apply selection-group updates due at `now`.
    pub fn advance(&mut self, now: u64) -> usize {
        self.foundation.advance(now)
    }

    /// Drain selected notifications.
    pub fn take_selected(&mut self) -> Vec<SelectedEvent> {
        self.foundation.adapter_mut().take_selected()
    }

    /// Tear down the menu and its collaborators.
    ///
    /// Closes the surface, drops pending updates, detaches listeners, and
    /// destroys the surface and the list when present. Safe to call more than
    /// once.
    pub fn destroy(&mut self) {
        self.foundation.destroy();
        self.foundation.adapter_mut().destroy_parts();
    }

    fn adapter(&self) -> &TreeAdapter<S, L> {
        self.foundation.adapter()
    }

    fn surface_mut(&mut self) -> &mut S {
        self.foundation.adapter_mut().surface_mut()
    }

    fn tag_of(&self, target: ElementId) -> TargetTag {
        self.tree()
            .tag(target)
            .map(TargetTag::from_tag_name)
            .unwrap_or_default()
    }
}
