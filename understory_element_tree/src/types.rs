// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, markers, and local data.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Rect};

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across moves but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Moving an element with [`Tree::insert_before`](crate::Tree::insert_before) keeps its id.
///
/// ### Ordering
///
/// `NodeId` is totally ordered (slot, then generation) so it can key ordered maps.
/// The order carries no meaning about document position; use
/// [`Tree::precedes`](crate::Tree::precedes) for that.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live element.
/// Stale `NodeId`s never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking, and dragging.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element is visible (participates in hit testing with `visible_only`).
        const VISIBLE   = 0b0000_0001;
        /// Element is pickable (participates in hit testing with `pickable_only`).
        const PICKABLE  = 0b0000_0010;
        /// Element can start a drag gesture.
        const DRAGGABLE = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

bitflags::bitflags! {
    /// Presentation markers applied to elements while a list is being sorted.
    ///
    /// Markers behave like class tokens: they show up in
    /// [`Tree::class_list`](crate::Tree::class_list) under the name returned
    /// by [`Markers::token`] and can be matched by selectors.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// The element being dragged.
        const MOVING = 0b0000_0001;
        /// The element currently under the pointer.
        const OVER   = 0b0000_0010;
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Markers {
    /// Class token for a single marker, or `None` for empty or combined sets.
    pub fn token(self) -> Option<&'static str> {
        if self == Self::MOVING {
            Some("moving")
        } else if self == Self::OVER {
            Some("over")
        } else {
            None
        }
    }

    /// Iterate the class tokens of every marker in this set.
    pub fn tokens(self) -> impl Iterator<Item = &'static str> {
        self.iter().filter_map(Self::token)
    }
}

bitflags::bitflags! {
    /// Document-wide default behaviors a drag gesture may need to suppress.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DocumentBehavior: u8 {
        /// Pointer drags select text.
        const TEXT_SELECTION = 0b0000_0001;
        /// Pointer drags start the platform's own drag and drop.
        const NATIVE_DRAG    = 0b0000_0010;
    }
}

impl Default for DocumentBehavior {
    fn default() -> Self {
        Self::all()
    }
}

/// Local data for an element.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Element name matched by tag selectors (e.g. `li`).
    pub tag: String,
    /// Author class tokens.
    pub classes: Vec<String>,
    /// Local (untransformed) bounds. For non-axis-aligned content, use a conservative AABB.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Z-order within parent stacking context. Higher is drawn on top.
    pub z_index: i32,
    /// Visibility, picking, and drag flags.
    pub flags: NodeFlags,
}

impl LocalNode {
    /// An element with the given tag and default geometry.
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add a class token.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set local bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.local_bounds = bounds;
        self
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            tag: String::new(),
            classes: Vec::new(),
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}
