// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating surface collaborator.
//!
//! The surface owns showing, hiding, and positioning the container the menu
//! renders into. The menu only forwards configuration to it and asks it to
//! close; [`BasicSurface`] is a state-only implementation for hosts that do
//! their own positioning, and for tests.

use kurbo::Insets;

bitflags::bitflags! {
    /// Corner of the anchor element the surface attaches to.
    ///
    /// The individual bits combine into the named corners, for example
    /// [`Corner::BOTTOM_END`]. `FLIP_RTL` makes left/right follow the text
    /// direction ("start"/"end").
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Corner: u8 {
        /// Attach to the bottom edge instead of the top.
        const BOTTOM   = 0b0000_0001;
        /// Center along the attached edge.
        const CENTER   = 0b0000_0010;
        /// Attach to the right edge instead of the left.
        const RIGHT    = 0b0000_0100;
        /// Mirror left/right in right-to-left layouts.
        const FLIP_RTL = 0b0000_1000;
    }
}

impl Corner {
    /// Top left.
    pub const TOP_LEFT: Self = Self::empty();
    /// Top right.
    pub const TOP_RIGHT: Self = Self::RIGHT;
    /// Bottom left.
    pub const BOTTOM_LEFT: Self = Self::BOTTOM;
    /// Bottom right.
    pub const BOTTOM_RIGHT: Self = Self::BOTTOM.union(Self::RIGHT);
    /// Top, leading edge.
    pub const TOP_START: Self = Self::FLIP_RTL;
    /// Top, trailing edge.
    pub const TOP_END: Self = Self::RIGHT.union(Self::FLIP_RTL);
    /// Bottom, leading edge.
    pub const BOTTOM_START: Self = Self::BOTTOM.union(Self::FLIP_RTL);
    /// Bottom, trailing edge.
    pub const BOTTOM_END: Self = Self::BOTTOM.union(Self::RIGHT).union(Self::FLIP_RTL);
}

impl Default for Corner {
    fn default() -> Self {
        Self::TOP_START
    }
}

/// The floating surface a menu renders inside.
pub trait MenuSurface {
    /// Element handle used for anchors.
    type Element;

    /// Returns `true` while the surface is open.
    fn is_open(&self) -> bool;

    /// Open the surface.
    fn show(&mut self);

    /// Close the surface. Must be idempotent.
    fn hide(&mut self);

    /// Set the anchor corner the surface attaches to.
    fn set_anchor_corner(&mut self, corner: Corner);

    /// Set the distance between the anchor and the surface.
    fn set_anchor_margin(&mut self, margin: Insets);

    /// Returns `true` if open/close animations are skipped.
    fn quick_open(&self) -> bool;

    /// Skip open/close animations.
    fn set_quick_open(&mut self, quick_open: bool);

    /// Position the surface relative to the viewport instead of the anchor's scroll container.
    fn set_fixed_position(&mut self, fixed: bool);

    /// Move the surface to the document root so ancestors cannot clip it.
    fn hoist_menu_to_body(&mut self);

    /// Declare that the surface has been hoisted by the host.
    fn set_is_hoisted(&mut self, hoisted: bool);

    /// Set the element the surface is positioned against.
    fn set_anchor_element(&mut self, anchor: Option<Self::Element>);

    /// Release resources held by the surface.
    fn destroy(&mut self);
}

/// A surface that only records its configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicSurface<E> {
    /// Whether the surface is open.
    pub open: bool,
    /// Anchor corner.
    pub anchor_corner: Corner,
    /// Anchor margin.
    pub anchor_margin: Insets,
    /// Whether animations are skipped.
    pub quick_open: bool,
    /// Whether the surface uses fixed positioning.
    pub fixed_position: bool,
    /// Whether the surface lives at the document root.
    pub hoisted: bool,
    /// The anchor element.
    pub anchor_element: Option<E>,
    /// Set once [`MenuSurface::destroy`] has run.
    pub destroyed: bool,
}

impl<E> Default for BasicSurface<E> {
    fn default() -> Self {
        Self {
            open: false,
            anchor_corner: Corner::default(),
            anchor_margin: Insets::ZERO,
            quick_open: false,
            fixed_position: false,
            hoisted: false,
            anchor_element: None,
            destroyed: false,
        }
    }
}

impl<E> MenuSurface for BasicSurface<E> {
    type Element = E;

    fn is_open(&self) -> bool {
        self.open
    }

    fn show(&mut self) {
        self.open = true;
    }

    fn hide(&mut self) {
        self.open = false;
    }

    fn set_anchor_corner(&mut self, corner: Corner) {
        self.anchor_corner = corner;
    }

    fn set_anchor_margin(&mut self, margin: Insets) {
        self.anchor_margin = margin;
    }

    fn quick_open(&self) -> bool {
        self.quick_open
    }

    fn set_quick_open(&mut self, quick_open: bool) {
        self.quick_open = quick_open;
    }

    fn set_fixed_position(&mut self, fixed: bool) {
        self.fixed_position = fixed;
    }

    fn hoist_menu_to_body(&mut self) {
        self.hoisted = true;
    }

    fn set_is_hoisted(&mut self, hoisted: bool) {
        self.hoisted = hoisted;
    }

    fn set_anchor_element(&mut self, anchor: Option<E>) {
        self.anchor_element = anchor;
    }

    fn destroy(&mut self) {
        self.open = false;
        self.destroyed = true;
    }
}
