// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, notification payloads, and configuration.

use crate::constants::numbers;

/// Keys the menu distinguishes.
///
/// Only [`Key::Enter`], [`Key::Space`], and [`Key::Tab`] have an effect; every
/// other key is ignored by the foundation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Activates the item under the target.
    Enter,
    /// Activates the item under the target.
    Space,
    /// Closes the menu without selecting.
    Tab,
    /// Escape.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`"Enter"`, `"Space"`, `" "`, `"Tab"`, `"Escape"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Space" | " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Map a legacy key code.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            13 => Self::Enter,
            32 => Self::Space,
            9 => Self::Tab,
            27 => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Returns `true` for keys that activate an item.
    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Coarse element kind of an event target.
///
/// Activation on an input element keeps the host's default action (for
/// example, a checkbox toggling itself).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetTag {
    /// An `<input>` element.
    Input,
    /// Anything else.
    #[default]
    Other,
}

impl TargetTag {
    /// Classify a tag name, ignoring ASCII case.
    pub fn from_tag_name(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("input") {
            Self::Input
        } else {
            Self::Other
        }
    }
}

/// A keydown or click delivered to the menu root.
///
/// `key` is `Some` for keyboard events and `None` for pointer clicks. `time` is
/// a host timestamp in milliseconds and anchors deferred selection updates.
///
/// Whether the host's default action should run is tracked on the event
/// itself; inspect [`MenuEvent::default_prevented`] after handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEvent<E> {
    /// Key for keyboard events, `None` for clicks.
    pub key: Option<Key>,
    /// Element the event was dispatched to.
    pub target: E,
    /// Kind of the target element.
    pub target_tag: TargetTag,
    /// Event timestamp in milliseconds.
    pub time: u64,
    default_prevented: bool,
}

impl<E> MenuEvent<E> {
    /// A keydown on `target`.
    pub fn key_down(key: Key, target: E, time: u64) -> Self {
        Self {
            key: Some(key),
            target,
            target_tag: TargetTag::Other,
            time,
            default_prevented: false,
        }
    }

    /// A pointer click on `target`.
    pub fn click(target: E, time: u64) -> Self {
        Self {
            key: None,
            target,
            target_tag: TargetTag::Other,
            time,
            default_prevented: false,
        }
    }

    /// Set the kind of the target element.
    pub fn with_target_tag(mut self, tag: TargetTag) -> Self {
        self.target_tag = tag;
        self
    }

    /// Returns `true` for pointer clicks.
    pub fn is_click(&self) -> bool {
        self.key.is_none()
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` if a handler suppressed the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Payload of the selected notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectedDetail {
    /// Position of the selected item in the flattened item list.
    pub index: usize,
}

/// Menu behavior configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Delay in milliseconds before selection-group markers are updated.
    ///
    /// Defaults to the surface's closing animation so markers change while
    /// the menu is already out of view.
    pub transition_close_duration: u64,
    /// Maximum number of parent hops when resolving the list item or selection
    /// group of a target.
    ///
    /// Unbounded by default, so walks end at the root. Lower it for adapters
    /// whose parent links may form a cycle.
    pub max_ancestor_depth: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            transition_close_duration: numbers::TRANSITION_CLOSE_DURATION,
            max_ancestor_depth: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_and_codes() {
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Space"), Key::Space);
        assert_eq!(Key::from_name("Tab"), Key::Tab);
        assert_eq!(Key::from_name("N"), Key::Other);
        assert_eq!(Key::from_key_code(13), Key::Enter);
        assert_eq!(Key::from_key_code(32), Key::Space);
        assert_eq!(Key::from_key_code(9), Key::Tab);
        assert_eq!(Key::from_key_code(78), Key::Other);
        assert!(Key::Space.activates());
        assert!(!Key::Tab.activates());
    }

    #[test]
    fn target_tag_ignores_case() {
        assert_eq!(TargetTag::from_tag_name("INPUT"), TargetTag::Input);
        assert_eq!(TargetTag::from_tag_name("input"), TargetTag::Input);
        assert_eq!(TargetTag::from_tag_name("li"), TargetTag::Other);
    }

    #[test]
    fn prevent_default_is_sticky() {
        let mut event = MenuEvent::click(1_u32, 0);
        assert!(event.is_click());
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
