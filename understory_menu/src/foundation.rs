// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu behavior core.
//!
//! ## Activation
//!
//! - Keydown: `Space`/`Enter` activate, `Tab` closes the surface, every other key is ignored.
//! - Click: always attempts activation.
//! - Activation walks from the target up to the nearest list item. No list item, no effect.
//! - The host default action is prevented unless the target is an input element.
//! - An untracked list item (no index) has no further effect.
//! - Otherwise the surface closes and the selected notification is emitted, immediately.
//!
//! ## Selection groups
//!
//! When the activated item sits in a selection group, the previous selection's
//! marker is removed and the new item's marker is added once the surface's
//! closing transition has elapsed. Both updates share one deadline and fire in
//! that order from [`MenuFoundation::advance`].

use smallvec::SmallVec;

use crate::adapter::MenuAdapter;
use crate::constants::{css_classes, strings};
use crate::types::{Key, MenuConfig, MenuEvent, SelectedDetail, TargetTag};

/// A deferred selection-group marker update.
///
/// The group's current selection is read when the update fires, so several
/// activations landing inside one closing transition still leave at most one
/// marked item per group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroupUpdate<E> {
    /// Timestamp (milliseconds) at or after which the update fires.
    pub due: u64,
    /// The selection group.
    pub group: E,
    /// Newly selected item.
    pub select: usize,
}

/// Interaction state machine for a menu.
///
/// The foundation owns its adapter and never renders anything itself: it
/// interprets [`MenuEvent`]s and issues commands through [`MenuAdapter`].
///
/// Time is supplied by the host. Events carry a timestamp, and deferred
/// selection-group updates are applied when the host calls
/// [`MenuFoundation::advance`] with a timestamp past their deadline.
pub struct MenuFoundation<A: MenuAdapter> {
    adapter: A,
    config: MenuConfig,
    pending: SmallVec<[GroupUpdate<A::Element>; 2]>,
    destroyed: bool,
}

impl<A: MenuAdapter + core::fmt::Debug> core::fmt::Debug for MenuFoundation<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuFoundation")
            .field("adapter", &self.adapter)
            .field("config", &self.config)
            .field("pending", &self.pending)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<A: MenuAdapter> MenuFoundation<A> {
    /// Create a foundation with the default [`MenuConfig`].
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, MenuConfig::default())
    }

    /// Create a foundation with a custom configuration.
    pub fn with_config(adapter: A, config: MenuConfig) -> Self {
        Self {
            adapter,
            config,
            pending: SmallVec::new(),
            destroyed: false,
        }
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// The active configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Returns `true` once [`MenuFoundation::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Handle a keydown on the menu root.
    ///
    /// Returns the index reported as selected, if any.
    pub fn handle_keydown(&mut self, event: &mut MenuEvent<A::Element>) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        match event.key {
            Some(Key::Tab) => {
                tracing::debug!("tab pressed, closing menu");
                self.adapter.close_surface();
                None
            }
            Some(key) if key.activates() => self.handle_activation(event),
            _ => None,
        }
    }

    /// Handle a click on the menu root.
    ///
    /// Returns the index reported as selected, if any.
    pub fn handle_click(&mut self, event: &mut MenuEvent<A::Element>) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        self.handle_activation(event)
    }

    /// Activate an already-resolved list item.
    ///
    /// Closes the surface and emits the selected notification when the item is
    /// tracked, and schedules the selection-group marker update relative to
    /// `time` when the item belongs to a group. Returns the item's index.
    pub fn handle_selection(&mut self, list_item: A::Element, time: u64) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        let Some(index) = self.adapter.element_index(list_item) else {
            tracing::debug!(item = ?list_item, "list item is not tracked by the menu");
            return None;
        };

        if let Some(group) = self.selection_group_of(list_item) {
            let update = GroupUpdate {
                due: time.saturating_add(self.config.transition_close_duration),
                group,
                select: index,
            };
            tracing::trace!(?update, "scheduled selection group update");
            self.pending.push(update);
        }

        tracing::trace!(index, "menu item activated");
        self.adapter.close_surface();
        self.adapter.notify_selected(SelectedDetail { index });
        Some(index)
    }

    /// Apply every pending group update due at `now`, in scheduling order.
    ///
    /// Returns the number of updates applied.
    pub fn advance(&mut self, now: u64) -> usize {
        if self.destroyed {
            return 0;
        }
        let mut fired = 0;
        while let Some(pos) = self.pending.iter().position(|u| u.due <= now) {
            let update = self.pending.remove(pos);
            self.apply(update);
            fired += 1;
        }
        fired
    }

    /// Earliest deadline among pending updates.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|u| u.due).min()
    }

    /// Returns `true` while group updates are waiting for their deadline.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Pending group updates in scheduling order.
    pub fn pending(&self) -> &[GroupUpdate<A::Element>] {
        &self.pending
    }

    /// Tear down: close the surface and drop pending updates.
    ///
    /// Safe to call at any time and more than once; each call requests one
    /// close. Events and [`MenuFoundation::advance`] are ignored afterwards.
    pub fn destroy(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                dropped = self.pending.len(),
                "dropping pending selection group updates"
            );
        }
        self.pending.clear();
        self.destroyed = true;
        self.adapter.close_surface();
    }

    fn handle_activation(&mut self, event: &mut MenuEvent<A::Element>) -> Option<usize> {
        let Some(list_item) = self.list_item_for(event.target) else {
            tracing::debug!(element = ?event.target, "event target is not inside a list item");
            return None;
        };
        if event.target_tag != TargetTag::Input {
            event.prevent_default();
        }
        self.handle_selection(list_item, event.time)
    }

    /// Nearest list item at or above `target`.
    fn list_item_for(&self, target: A::Element) -> Option<A::Element> {
        let mut current = target;
        for _ in 0..=self.config.max_ancestor_depth {
            if self
                .adapter
                .element_contains_class(current, css_classes::LIST_ITEM_CLASS)
            {
                return Some(current);
            }
            current = self.adapter.parent_element(current)?;
        }
        None
    }

    /// Selection group containing `list_item`, stopping at the enclosing list.
    fn selection_group_of(&self, list_item: A::Element) -> Option<A::Element> {
        let mut current = self.adapter.parent_element(list_item)?;
        for _ in 0..self.config.max_ancestor_depth {
            if self
                .adapter
                .element_contains_class(current, css_classes::MENU_SELECTION_GROUP)
            {
                return Some(current);
            }
            if self
                .adapter
                .element_contains_class(current, css_classes::LIST_CLASS)
            {
                return None;
            }
            current = self.adapter.parent_element(current)?;
        }
        None
    }

    fn apply(&mut self, update: GroupUpdate<A::Element>) {
        tracing::trace!(?update, "applying selection group update");
        let previous = self
            .adapter
            .selected_element_index(update.group)
            .filter(|&previous| previous != update.select);
        if let Some(previous) = previous {
            self.adapter.remove_attribute_from_element_at_index(
                previous,
                strings::ARIA_SELECTED_ATTR,
            );
            self.adapter.remove_class_from_element_at_index(
                previous,
                css_classes::MENU_SELECTED_LIST_ITEM,
            );
        }
        self.adapter
            .add_class_to_element_at_index(update.select, css_classes::MENU_SELECTED_LIST_ITEM);
        self.adapter.add_attribute_to_element_at_index(
            update.select,
            strings::ARIA_SELECTED_ATTR,
            "true",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::numbers::TRANSITION_CLOSE_DURATION;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    const SELECTED: &str = css_classes::MENU_SELECTED_LIST_ITEM;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        AddClass(usize, String),
        RemoveClass(usize, String),
        AddAttribute(usize, String, String),
        RemoveAttribute(usize, String),
        CloseSurface,
        Notify(SelectedDetail),
        ToggleCheckbox(u32),
    }

    /// Adapter over a hand-built parent map that records every command.
    #[derive(Debug, Default)]
    struct RecordingAdapter {
        parents: BTreeMap<u32, u32>,
        classes: Vec<(u32, &'static str)>,
        indices: BTreeMap<u32, usize>,
        selected: BTreeMap<u32, usize>,
        calls: Vec<Call>,
        class_queries: Cell<usize>,
    }

    impl RecordingAdapter {
        fn parent(mut self, child: u32, parent: u32) -> Self {
            self.parents.insert(child, parent);
            self
        }

        fn class(mut self, element: u32, class: &'static str) -> Self {
            self.classes.push((element, class));
            self
        }

        fn item(self, element: u32, index: usize) -> Self {
            let mut this = self.class(element, css_classes::LIST_ITEM_CLASS);
            this.indices.insert(element, index);
            this
        }

        fn selected_in(mut self, group: u32, index: usize) -> Self {
            self.selected.insert(group, index);
            self
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }

        fn closes(&self) -> usize {
            self.count(&Call::CloseSurface)
        }

        fn notifications(&self) -> Vec<SelectedDetail> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Notify(d) => Some(*d),
                    _ => None,
                })
                .collect()
        }

        fn marker_calls(&self) -> Vec<Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::AddClass(..) | Call::RemoveClass(..)))
                .cloned()
                .collect()
        }
    }

    impl MenuAdapter for RecordingAdapter {
        type Element = u32;

        fn add_class_to_element_at_index(&mut self, index: usize, class_name: &str) {
            self.calls.push(Call::AddClass(index, class_name.to_string()));
        }

        fn remove_class_from_element_at_index(&mut self, index: usize, class_name: &str) {
            self.calls
                .push(Call::RemoveClass(index, class_name.to_string()));
        }

        fn add_attribute_to_element_at_index(&mut self, index: usize, name: &str, value: &str) {
            self.calls.push(Call::AddAttribute(
                index,
                name.to_string(),
                value.to_string(),
            ));
        }

        fn remove_attribute_from_element_at_index(&mut self, index: usize, name: &str) {
            self.calls
                .push(Call::RemoveAttribute(index, name.to_string()));
        }

        fn element_contains_class(&self, element: u32, class_name: &str) -> bool {
            self.class_queries.set(self.class_queries.get() + 1);
            self.classes
                .iter()
                .any(|&(e, c)| e == element && c == class_name)
        }

        fn close_surface(&mut self) {
            self.calls.push(Call::CloseSurface);
        }

        fn element_index(&self, element: u32) -> Option<usize> {
            self.indices.get(&element).copied()
        }

        fn parent_element(&self, element: u32) -> Option<u32> {
            self.parents.get(&element).copied()
        }

        fn selected_element_index(&self, group: u32) -> Option<usize> {
            self.selected.get(&group).copied()
        }

        fn notify_selected(&mut self, detail: SelectedDetail) {
            self.calls.push(Call::Notify(detail));
        }

        fn toggle_checkbox(&mut self, element: u32) {
            self.calls.push(Call::ToggleCheckbox(element));
        }
    }

    /// list(100) > [item 1, group(200) > [item 2, item 3]]
    fn grouped(selected: Option<usize>) -> RecordingAdapter {
        let adapter = RecordingAdapter::default()
            .class(100, css_classes::LIST_CLASS)
            .class(200, css_classes::MENU_SELECTION_GROUP)
            .class(200, css_classes::LIST_CLASS)
            .parent(1, 100)
            .parent(200, 100)
            .parent(2, 200)
            .parent(3, 200)
            .item(1, 0)
            .item(2, 1)
            .item(3, 2);
        match selected {
            Some(index) => adapter.selected_in(200, index),
            None => adapter,
        }
    }

    #[test]
    fn destroy_closes_surface_once() {
        let mut foundation = MenuFoundation::new(RecordingAdapter::default());
        foundation.destroy();
        assert_eq!(foundation.adapter().closes(), 1, "destroy should close once");
        assert!(foundation.is_destroyed());
    }

    #[test]
    fn destroy_right_after_keydown_drops_pending_update() {
        let mut foundation = MenuFoundation::new(grouped(Some(2)));
        let mut event = MenuEvent::key_down(Key::Space, 2, 0);
        foundation.handle_keydown(&mut event);
        assert!(foundation.has_pending());

        foundation.destroy();
        assert!(!foundation.has_pending());
        assert_eq!(foundation.advance(TRANSITION_CLOSE_DURATION), 0);
        assert!(foundation.adapter().marker_calls().is_empty());
        // One close from the activation, one from destroy.
        assert_eq!(foundation.adapter().closes(), 2);
    }

    #[test]
    fn events_after_destroy_are_ignored() {
        let mut foundation = MenuFoundation::new(grouped(None));
        foundation.destroy();
        let mut event = MenuEvent::click(1, 0);
        assert_eq!(foundation.handle_click(&mut event), None);
        let mut event = MenuEvent::key_down(Key::Tab, 1, 0);
        assert_eq!(foundation.handle_keydown(&mut event), None);
        assert_eq!(foundation.adapter().closes(), 1);
    }

    #[test]
    fn unrelated_keys_do_nothing() {
        let mut foundation = MenuFoundation::new(grouped(None));
        for key in [Key::Other, Key::Escape] {
            let mut event = MenuEvent::key_down(key, 1, 0);
            assert_eq!(foundation.handle_keydown(&mut event), None);
            assert!(!event.default_prevented());
        }
        assert_eq!(foundation.adapter().closes(), 0);
        assert_eq!(foundation.adapter().class_queries.get(), 0);
    }

    #[test]
    fn tab_closes_without_selecting() {
        let mut foundation = MenuFoundation::new(grouped(None));
        let mut event = MenuEvent::key_down(Key::Tab, 1, 0);
        assert_eq!(foundation.handle_keydown(&mut event), None);
        assert_eq!(foundation.adapter().closes(), 1);
        assert!(foundation.adapter().notifications().is_empty());
        assert_eq!(foundation.adapter().class_queries.get(), 0);
    }

    #[test]
    fn space_and_enter_close_and_notify() {
        for key in [Key::Space, Key::Enter] {
            let mut foundation = MenuFoundation::new(grouped(None));
            let mut event = MenuEvent::key_down(key, 1, 0);
            assert_eq!(foundation.handle_keydown(&mut event), Some(0));
            assert_eq!(foundation.adapter().closes(), 1);
            assert_eq!(
                foundation.adapter().notifications(),
                vec![SelectedDetail { index: 0 }]
            );
            assert!(event.default_prevented());
        }
    }

    #[test]
    fn click_closes_and_notifies() {
        let mut foundation = MenuFoundation::new(grouped(None));
        let mut event = MenuEvent::click(1, 0);
        assert_eq!(foundation.handle_click(&mut event), Some(0));
        assert_eq!(foundation.adapter().closes(), 1);
        assert_eq!(
            foundation.adapter().notifications(),
            vec![SelectedDetail { index: 0 }]
        );
    }

    #[test]
    fn input_targets_keep_their_default_action() {
        let mut foundation = MenuFoundation::new(grouped(None));
        let mut event = MenuEvent::key_down(Key::Space, 1, 0).with_target_tag(TargetTag::Input);
        foundation.handle_keydown(&mut event);
        assert!(!event.default_prevented());

        let mut event = MenuEvent::click(1, 0).with_target_tag(TargetTag::Input);
        foundation.handle_click(&mut event);
        assert!(!event.default_prevented());
    }

    #[test]
    fn target_inside_list_item_resolves_to_the_item() {
        let adapter = grouped(None).parent(10, 1);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::key_down(Key::Enter, 10, 0);
        assert_eq!(foundation.handle_keydown(&mut event), Some(0));
        assert_eq!(
            foundation.adapter().notifications(),
            vec![SelectedDetail { index: 0 }]
        );
    }

    #[test]
    fn target_outside_any_list_item_does_nothing() {
        let adapter = grouped(None).parent(10, 100);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::click(10, 0);
        assert_eq!(foundation.handle_click(&mut event), None);
        assert_eq!(foundation.adapter().closes(), 0);
        assert!(foundation.adapter().notifications().is_empty());
        assert!(!event.default_prevented());
    }

    #[test]
    fn detached_target_terminates_walk() {
        let mut foundation = MenuFoundation::new(RecordingAdapter::default());
        let mut event = MenuEvent::key_down(Key::Space, 42, 0);
        assert_eq!(foundation.handle_keydown(&mut event), None);
        assert!(foundation.adapter().calls.is_empty());
    }

    #[test]
    fn cyclic_parents_are_bounded() {
        let adapter = RecordingAdapter::default().parent(5, 5);
        let config = MenuConfig {
            max_ancestor_depth: 4,
            ..MenuConfig::default()
        };
        let mut foundation = MenuFoundation::with_config(adapter, config);
        let mut event = MenuEvent::click(5, 0);
        assert_eq!(foundation.handle_click(&mut event), None);
        assert_eq!(foundation.adapter().class_queries.get(), 5);
    }

    #[test]
    fn untracked_list_item_does_nothing_observable() {
        let adapter = RecordingAdapter::default().class(7, css_classes::LIST_ITEM_CLASS);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::key_down(Key::Space, 7, 0);
        assert_eq!(foundation.handle_keydown(&mut event), None);
        assert_eq!(foundation.adapter().closes(), 0);
        assert!(foundation.adapter().notifications().is_empty());
        assert!(!foundation.has_pending());
    }

    #[test]
    fn group_with_other_selection_swaps_markers_after_delay() {
        let mut foundation = MenuFoundation::new(grouped(Some(2)));
        let mut event = MenuEvent::key_down(Key::Space, 2, 1_000);
        assert_eq!(foundation.handle_keydown(&mut event), Some(1));

        // Close and notify happen immediately; markers wait for the transition.
        assert_eq!(foundation.adapter().closes(), 1);
        assert!(foundation.adapter().marker_calls().is_empty());
        assert_eq!(
            foundation.next_deadline(),
            Some(1_000 + TRANSITION_CLOSE_DURATION)
        );
        assert_eq!(foundation.advance(1_000 + TRANSITION_CLOSE_DURATION - 1), 0);

        assert_eq!(foundation.advance(1_000 + TRANSITION_CLOSE_DURATION), 1);
        assert_eq!(
            foundation.adapter().marker_calls(),
            vec![
                Call::RemoveClass(2, SELECTED.to_string()),
                Call::AddClass(1, SELECTED.to_string()),
            ]
        );
        assert_eq!(
            foundation.adapter().count(&Call::AddAttribute(
                1,
                strings::ARIA_SELECTED_ATTR.to_string(),
                "true".to_string()
            )),
            1
        );
        assert_eq!(
            foundation.adapter().count(&Call::RemoveAttribute(
                2,
                strings::ARIA_SELECTED_ATTR.to_string()
            )),
            1
        );
        assert!(!foundation.has_pending());
    }

    #[test]
    fn group_without_selection_only_adds() {
        let mut foundation = MenuFoundation::new(grouped(None));
        let mut event = MenuEvent::click(3, 0);
        foundation.handle_click(&mut event);
        foundation.advance(TRANSITION_CLOSE_DURATION);
        assert_eq!(
            foundation.adapter().marker_calls(),
            vec![Call::AddClass(2, SELECTED.to_string())]
        );
    }

    #[test]
    fn reselecting_the_selected_item_only_adds() {
        let mut foundation = MenuFoundation::new(grouped(Some(1)));
        let mut event = MenuEvent::click(2, 0);
        foundation.handle_click(&mut event);
        foundation.advance(TRANSITION_CLOSE_DURATION);
        assert_eq!(
            foundation.adapter().marker_calls(),
            vec![Call::AddClass(1, SELECTED.to_string())]
        );
    }

    #[test]
    fn group_found_through_wrapper() {
        // group(200) > wrapper(300) > item 4
        let adapter = grouped(None).parent(300, 200).parent(4, 300).item(4, 3);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::key_down(Key::Enter, 4, 0);
        foundation.handle_keydown(&mut event);
        foundation.advance(TRANSITION_CLOSE_DURATION);
        assert_eq!(
            foundation.adapter().marker_calls(),
            vec![Call::AddClass(3, SELECTED.to_string())]
        );
    }

    #[test]
    fn deep_wrappers_still_reach_group() {
        // group(200) > 40 wrappers (1000..1040) > item 4
        let mut adapter = grouped(None).parent(1000, 200).item(4, 3);
        for wrapper in 1001..1040 {
            adapter = adapter.parent(wrapper, wrapper - 1);
        }
        adapter = adapter.parent(4, 1039);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::click(4, 0);
        assert_eq!(foundation.handle_click(&mut event), Some(3));
        assert_eq!(foundation.pending().len(), 1);
        assert_eq!(foundation.pending()[0].group, 200);
    }

    #[test]
    fn walk_stops_at_enclosing_list() {
        // outer group(900) > list(100) > item 1: the list boundary hides the group.
        let adapter = grouped(None)
            .class(900, css_classes::MENU_SELECTION_GROUP)
            .parent(100, 900);
        let mut foundation = MenuFoundation::new(adapter);
        let mut event = MenuEvent::click(1, 0);
        assert_eq!(foundation.handle_click(&mut event), Some(0));
        assert!(!foundation.has_pending());
        foundation.advance(u64::MAX);
        assert!(foundation.adapter().marker_calls().is_empty());
        assert_eq!(foundation.adapter().closes(), 1);
    }

    #[test]
    fn items_outside_groups_never_touch_markers() {
        let mut foundation = MenuFoundation::new(grouped(Some(1)));
        let mut event = MenuEvent::click(1, 0);
        foundation.handle_click(&mut event);
        assert_eq!(foundation.advance(u64::MAX), 0);
        assert!(foundation.adapter().marker_calls().is_empty());
    }

    #[test]
    fn overlapping_activations_apply_in_order() {
        let mut foundation = MenuFoundation::new(grouped(Some(2)));
        let mut first = MenuEvent::click(2, 0);
        foundation.handle_click(&mut first);
        let mut second = MenuEvent::click(3, 10);
        foundation.handle_click(&mut second);
        assert_eq!(foundation.pending().len(), 2);

        assert_eq!(foundation.advance(TRANSITION_CLOSE_DURATION), 1);
        assert_eq!(foundation.advance(TRANSITION_CLOSE_DURATION + 10), 1);
        assert_eq!(
            foundation.adapter().marker_calls(),
            vec![
                Call::RemoveClass(2, SELECTED.to_string()),
                Call::AddClass(1, SELECTED.to_string()),
                Call::AddClass(2, SELECTED.to_string()),
            ]
        );
    }

    #[test]
    fn foundation_never_toggles_checkboxes() {
        let mut foundation = MenuFoundation::new(grouped(None));
        let mut event = MenuEvent::click(1, 0);
        foundation.handle_click(&mut event);
        assert_eq!(foundation.adapter().count(&Call::ToggleCheckbox(1)), 0);
    }
}
