// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, classes, attributes, focus.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{ElementFlags, ElementId, TreeError};

/// Tree of tagged elements.
///
/// Elements are stored in slots with a per-slot generation, so removed
/// elements can be reused without stale [`ElementId`]s observing the new
/// occupant.
///
/// ## Example
///
/// ```rust
/// use understory_element_tree::ElementTree;
///
/// let mut tree = ElementTree::new();
/// let item = tree.insert(None, "LI").unwrap();
/// let checkbox = tree.insert(Some(item), "input").unwrap();
/// tree.set_attribute(checkbox, "type", "checkbox");
///
/// assert_eq!(tree.tag(item), Some("li"));
/// assert_eq!(tree.first_checkbox(item), Some(checkbox));
/// assert_eq!(tree.checked(checkbox), Some(false));
/// ```
#[derive(Clone, Default)]
pub struct ElementTree {
    /// slots
    elements: Vec<Option<Element>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    focused: Option<ElementId>,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|e| e.is_some()).count();
        f.debug_struct("ElementTree")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: SmallVec<[String; 4]>,
    attributes: HashMap<String, String>,
    flags: ElementFlags,
}

impl Element {
    fn new(generation: u32, tag: &str) -> Self {
        Self {
            generation,
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            classes: SmallVec::new(),
            attributes: HashMap::new(),
            flags: ElementFlags::empty(),
        }
    }
}

impl ElementTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element with `tag` as the last child of `parent` (or as a
    /// root if `None`).
    ///
    /// Tag names are stored lowercase.
    pub fn insert(&mut self, parent: Option<ElementId>, tag: &str) -> Result<ElementId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleParent(p));
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, tag));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, tag)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent {
            self.element_mut(id).parent = Some(p);
            self.element_mut(p).children.push(id);
        }
        Ok(id)
    }

    /// Remove an element and its whole subtree.
    ///
    /// Stale ids are ignored. If the focused element is removed, focus is
    /// cleared.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.element(id).parent
            && self.is_alive(parent)
        {
            self.element_mut(parent).children.retain(|c| *c != id);
        }
        let children = core::mem::take(&mut self.element_mut(id).children);
        for child in children {
            self.remove(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|e| e.as_ref())
            .is_some_and(|e| e.generation == id.1)
    }

    /// Returns the parent of an element if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Get the children of an element, or an empty slice if the element is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the lowercase tag name of a live element.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.tag.as_str())
    }

    /// Returns the flags of a live element.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.get(id).map(|e| e.flags)
    }

    /// Add `class` to an element. Duplicates and stale ids are ignored.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let Some(e) = self.get_mut(id) else {
            return;
        };
        if !e.classes.iter().any(|c| c == class) {
            e.classes.push(class.to_string());
        }
    }

    /// Remove `class` from an element. Missing classes and stale ids are ignored.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(e) = self.get_mut(id) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Returns `true` if a live element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Iterate over the classes of an element in insertion order.
    pub fn classes(&self, id: ElementId) -> impl Iterator<Item = &str> {
        self.get(id)
            .into_iter()
            .flat_map(|e| e.classes.iter().map(String::as_str))
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(id) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(e) = self.get_mut(id) {
            e.attributes.remove(name);
        }
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Returns all descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children_of(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children_of(id).iter().rev().copied());
        }
        out
    }

    /// Returns the descendants of `root` carrying `class`, in document order.
    pub fn query_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// Returns the first descendant of `root` carrying `class`.
    pub fn query_first_class(&self, root: ElementId, class: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.has_class(id, class))
    }

    /// Returns `true` if the element is an `<input type="checkbox">`.
    pub fn is_checkbox(&self, id: ElementId) -> bool {
        self.tag(id) == Some("input")
            && self
                .attribute(id, "type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    /// Returns the first checkbox among the descendants of `root`.
    pub fn first_checkbox(&self, root: ElementId) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.is_checkbox(id))
    }

    /// Returns the checked state of a checkbox, or `None` for other elements.
    pub fn checked(&self, id: ElementId) -> Option<bool> {
        if !self.is_checkbox(id) {
            return None;
        }
        self.flags(id).map(|f| f.contains(ElementFlags::CHECKED))
    }

    /// Set the checked state of a checkbox. Other elements are left untouched.
    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        if !self.is_checkbox(id) {
            return;
        }
        if let Some(e) = self.get_mut(id) {
            e.flags.set(ElementFlags::CHECKED, checked);
        }
    }

    /// Move focus to a live element.
    pub fn focus(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.focused = Some(id);
        }
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Returns the focused element, if any.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused.filter(|&id| self.is_alive(id))
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|e| e.generation == id.1)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|e| e.generation == id.1)
    }

    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()].as_mut().expect("dangling ElementId")
    }
}
