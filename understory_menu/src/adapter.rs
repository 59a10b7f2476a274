// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability set the menu foundation drives.

use crate::types::SelectedDetail;

/// Host capabilities required by [`MenuFoundation`](crate::MenuFoundation).
///
/// Items are addressed two ways: by element handle (for structural queries on
/// event targets) and by their position in the flattened item list (for
/// mutations). Index-addressed mutations must be silent no-ops when the index
/// is out of range. "Not found" answers are `None`, never errors.
pub trait MenuAdapter {
    /// Opaque element handle.
    type Element: Copy + Eq + core::fmt::Debug;

    /// Add a class to the item at `index`.
    fn add_class_to_element_at_index(&mut self, index: usize, class_name: &str);

    /// Remove a class from the item at `index`.
    fn remove_class_from_element_at_index(&mut self, index: usize, class_name: &str);

    /// Set an attribute on the item at `index`.
    fn add_attribute_to_element_at_index(&mut self, index: usize, name: &str, value: &str);

    /// Remove an attribute from the item at `index`.
    fn remove_attribute_from_element_at_index(&mut self, index: usize, name: &str);

    /// Returns `true` if `element` carries `class_name`.
    fn element_contains_class(&self, element: Self::Element, class_name: &str) -> bool;

    /// Request that the surface close. Must be idempotent.
    fn close_surface(&mut self);

    /// Position of `element` in the flattened item list, or `None` if untracked.
    fn element_index(&self, element: Self::Element) -> Option<usize>;

    /// Parent of `element`, or `None` at a root or for detached elements.
    fn parent_element(&self, element: Self::Element) -> Option<Self::Element>;

    /// Position of the selected item inside `group`, or `None` if nothing is selected.
    fn selected_element_index(&self, group: Self::Element) -> Option<usize>;

    /// Emit the selected notification.
    fn notify_selected(&mut self, detail: SelectedDetail);

    /// Flip the checkbox nested in `element`, if there is one.
    fn toggle_checkbox(&mut self, element: Self::Element);
}
