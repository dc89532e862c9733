// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the controller: input events, outcomes, and input modes.
//!
//! ## Overview
//!
//! Hosts translate their platform input into [`InputEvent`] values and feed
//! them to [`Sortable::handle`](crate::Sortable::handle). The returned
//! [`Outcome`] tells the host whether the event was for this controller and
//! whether the platform's default action should be prevented.

use kurbo::Point;
use understory_element_tree::NodeId;

/// Native drag-and-drop notifications.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DragEventKind {
    /// A drag gesture starts on the target.
    DragStart,
    /// The dragged pointer enters the target.
    DragEnter,
    /// The dragged pointer moves over the target.
    DragOver,
    /// The dragged pointer leaves the target.
    DragLeave,
    /// The dragged element is released over the target.
    Drop,
    /// The gesture ends, dropped or cancelled.
    DragEnd,
}

/// A native drag event and the element it was fired on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DragEvent {
    /// Event kind.
    pub kind: DragEventKind,
    /// Innermost element the platform fired the event on.
    pub target: NodeId,
}

impl DragEvent {
    /// Build a drag event.
    pub const fn new(kind: DragEventKind, target: NodeId) -> Self {
        Self { kind, target }
    }
}

/// Low-level pointer notifications used when native drag is unavailable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerEventKind {
    /// Pointer pressed (mouse down, touch start).
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released (mouse up, touch end).
    Up,
}

/// A pointer event at a world-space position.
///
/// Pointer events carry no target; the controller hit-tests the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerEventKind,
    /// World-space pointer position.
    pub position: Point,
}

impl PointerEvent {
    /// Build a pointer event.
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// Input delivered to a [`Sortable`](crate::Sortable).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Native drag-and-drop event.
    Drag(DragEvent),
    /// Pointer event for the synthetic gesture.
    Pointer(PointerEvent),
    /// The window or surface lost input focus.
    ///
    /// Ends an active session as if the gesture had ended, so a drag that
    /// never receives its end notification does not leave stale markers.
    FocusLost,
}

impl From<DragEvent> for InputEvent {
    fn from(e: DragEvent) -> Self {
        Self::Drag(e)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(e: PointerEvent) -> Self {
        Self::Pointer(e)
    }
}

/// Result of handling one input event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The event does not concern this controller; let it propagate untouched.
    Ignored,
    /// Handled; the platform's default action may proceed.
    Continue,
    /// Handled; prevent the platform's default action and stop propagation.
    ///
    /// Native drag targets must consume enter/over to be eligible drop targets.
    Consume,
}

impl Outcome {
    /// Returns true unless the event was ignored.
    pub fn is_handled(self) -> bool {
        self != Self::Ignored
    }

    /// Combine outcomes of synthetic sub-events; the strongest wins.
    pub(crate) fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Consume, _) | (_, Self::Consume) => Self::Consume,
            (Self::Continue, _) | (_, Self::Continue) => Self::Continue,
            _ => Self::Ignored,
        }
    }
}

/// Which input path a controller listens to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InputMode {
    /// Native drag-and-drop events; pointer events are ignored.
    #[default]
    Native,
    /// Synthetic gesture built from pointer events; native drag events are ignored.
    Synthetic,
}

impl InputMode {
    /// Pick the input path for a platform.
    pub fn detect(support: PlatformSupport) -> Self {
        if support.native_drag {
            Self::Native
        } else {
            Self::Synthetic
        }
    }
}

/// Platform capabilities relevant to dragging.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlatformSupport {
    /// The platform delivers native drag-and-drop events.
    pub native_drag: bool,
}
