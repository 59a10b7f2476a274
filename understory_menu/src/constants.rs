// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names, attribute names, and timings shared by the menu and its hosts.

/// Class names the menu reads and writes.
pub mod css_classes {
    /// Root element of a menu.
    pub const ROOT: &str = "menu";
    /// Marker on the selected item of a selection group.
    pub const MENU_SELECTED_LIST_ITEM: &str = "menu-item--selected";
    /// Container of a single-selection cluster of items.
    pub const MENU_SELECTION_GROUP: &str = "menu__selection-group";
    /// Root element of an item list.
    pub const LIST_CLASS: &str = "list";
    /// A selectable row.
    pub const LIST_ITEM_CLASS: &str = "list-item";
    /// Marker on the surface while it is open.
    pub const SURFACE_OPEN: &str = "menu-surface--open";
}

/// Event and attribute names.
pub mod strings {
    /// Name of the notification emitted when an item is selected.
    pub const SELECTED_EVENT: &str = "menu:selected";
    /// Accessibility attribute mirrored alongside the selected marker.
    pub const ARIA_SELECTED_ATTR: &str = "aria-selected";
}

/// Timings in milliseconds.
pub mod numbers {
    /// Length of the surface's closing animation.
    pub const TRANSITION_CLOSE_DURATION: u64 = 75;
}
