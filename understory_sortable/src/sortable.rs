// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sortable controller.
//!
//! ## State machine
//!
//! ```text
//! IDLE --(drag start on child C)--> DRAGGING(dragged = C)
//! DRAGGING --(enter T)--> DRAGGING     live reorder when T != C and warp is off
//! DRAGGING --(leave T)--> DRAGGING     counter decrement only
//! DRAGGING --(drop on T)--> DRAGGING   swap when warp is on; change(T, C)
//! DRAGGING --(drag end | focus lost)--> IDLE
//! ```
//!
//! Drag end returns to idle whether or not a drop happened; a cancelled
//! gesture only ever sees drag end.

use alloc::vec::Vec;

use thiserror::Error;
use tracing::{debug, trace};
use understory_element_tree::{Markers, NodeId, QueryFilter, Selector, SelectorError, Tree};

use crate::delegate::{ChildPredicate, recognized_children, resolve_child};
use crate::options::{ChangeFn, LifecycleFn, SortableConfig, SortableOptions};
use crate::pointer::SyntheticGesture;
use crate::session::DragSession;
use crate::types::{
    DragEvent, DragEventKind, InputEvent, InputMode, Outcome, PointerEvent, PointerEventKind,
};

/// Errors from [`Sortable::bind`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BindError {
    /// The child selector failed to parse.
    #[error("invalid child selector: {0}")]
    Selector(#[from] SelectorError),
    /// The container id does not refer to a live element.
    #[error("container is not a live element")]
    StaleContainer,
}

/// Drag-to-reorder controller bound to one container.
///
/// ## Usage
///
/// - Bind with [`Sortable::bind`]; every recognized child becomes draggable.
/// - Feed every input event for the container to [`Sortable::handle`] and
///   honor the returned [`Outcome`].
/// - Re-run [`Sortable::refresh`] after adding children if the host relies
///   on the draggable flag.
///
/// Several controllers may share one tree; each owns its own session.
pub struct Sortable {
    container: NodeId,
    predicate: ChildPredicate,
    config: SortableConfig,
    on_change: Option<ChangeFn>,
    on_start: Option<LifecycleFn>,
    on_stop: Option<LifecycleFn>,
    session: Option<DragSession>,
    gesture: Option<SyntheticGesture>,
}

impl core::fmt::Debug for Sortable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sortable")
            .field("container", &self.container)
            .field("predicate", &self.predicate)
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Sortable {
    /// Bind a controller to `container`.
    ///
    /// With `selector == None` the container's element children are sortable;
    /// otherwise descendants matching the selector are.
    pub fn bind(
        tree: &mut Tree,
        container: NodeId,
        selector: Option<&str>,
        options: SortableOptions,
    ) -> Result<Self, BindError> {
        let predicate = match selector {
            Some(s) => ChildPredicate::Selector(Selector::parse(s)?),
            None => ChildPredicate::DirectChild,
        };
        Self::bind_with(tree, container, predicate, options)
    }

    /// Bind a controller with an explicit predicate.
    pub fn bind_with(
        tree: &mut Tree,
        container: NodeId,
        predicate: ChildPredicate,
        options: SortableOptions,
    ) -> Result<Self, BindError> {
        if !tree.is_alive(container) {
            return Err(BindError::StaleContainer);
        }
        let SortableOptions {
            config,
            on_change,
            on_start,
            on_stop,
        } = options;
        let this = Self {
            container,
            predicate,
            config,
            on_change,
            on_start,
            on_stop,
            session: None,
            gesture: None,
        };
        let marked = this.refresh(tree);
        debug!(
            ?container,
            children = marked,
            warp = config.warp,
            input = ?config.input,
            "sortable bound"
        );
        Ok(this)
    }

    /// Mark every recognized child draggable; returns how many were marked.
    pub fn refresh(&self, tree: &mut Tree) -> usize {
        let children = recognized_children(tree, self.container, &self.predicate);
        for &child in &children {
            tree.set_draggable(child, true);
        }
        children.len()
    }

    /// End any active session and clear the draggable flag on recognized children.
    pub fn unbind(mut self, tree: &mut Tree) {
        let _ = self.focus_lost(tree);
        for child in recognized_children(tree, self.container, &self.predicate) {
            tree.set_draggable(child, false);
        }
        debug!(container = ?self.container, "sortable unbound");
    }

    /// The bound container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The recognized-child predicate.
    pub fn predicate(&self) -> &ChildPredicate {
        &self.predicate
    }

    /// The plain-data configuration.
    pub fn config(&self) -> SortableConfig {
        self.config
    }

    /// The child being dragged, if a session is active.
    pub fn dragging(&self) -> Option<NodeId> {
        self.session.as_ref().map(DragSession::dragged)
    }

    /// Enter counter of `child` in the active session; zero when idle.
    pub fn counter(&self, child: NodeId) -> u32 {
        self.session.as_ref().map_or(0, |s| s.counter(child))
    }

    /// Handle one input event.
    pub fn handle(&mut self, tree: &mut Tree, event: impl Into<InputEvent>) -> Outcome {
        match (self.config.input, event.into()) {
            (_, InputEvent::FocusLost) => self.focus_lost(tree),
            (InputMode::Native, InputEvent::Drag(e)) => self.dispatch(tree, e),
            (InputMode::Synthetic, InputEvent::Pointer(e)) => self.pointer(tree, e),
            (mode, event) => {
                trace!(?mode, ?event, "event does not match the input mode");
                Outcome::Ignored
            }
        }
    }

    // --- drag events ---

    fn dispatch(&mut self, tree: &mut Tree, event: DragEvent) -> Outcome {
        // Drag end tears down regardless of where it fired.
        if event.kind == DragEventKind::DragEnd {
            return self.end_session(tree, "drag end");
        }
        let Some(child) = resolve_child(tree, event.target, self.container, &self.predicate)
        else {
            trace!(kind = ?event.kind, target = ?event.target, "target outside sortable children");
            return Outcome::Ignored;
        };
        match event.kind {
            DragEventKind::DragStart => self.drag_start(tree, child),
            DragEventKind::DragEnter => self.drag_enter(tree, child),
            DragEventKind::DragOver => self.drag_over(),
            DragEventKind::DragLeave => self.drag_leave(tree, child),
            DragEventKind::Drop => self.drop_on(tree, child),
            DragEventKind::DragEnd => self.end_session(tree, "drag end"),
        }
    }

    fn drag_start(&mut self, tree: &mut Tree, child: NodeId) -> Outcome {
        if let Some(session) = &self.session {
            trace!(active = ?session.dragged(), ?child, "drag start during an active session");
            return Outcome::Ignored;
        }
        self.session = Some(DragSession::new(child));
        tree.add_markers(child, Markers::MOVING);
        if let Some(f) = self.on_start.as_mut() {
            f();
        }
        debug!(dragged = ?child, "drag started");
        Outcome::Continue
    }

    fn drag_enter(&mut self, tree: &mut Tree, child: NodeId) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored;
        };
        let first = session.enter(child);
        trace!(?child, counter = session.counter(child), "enter");
        if first {
            tree.add_markers(child, Markers::OVER);
            let dragged = session.dragged();
            if child != dragged && !self.config.warp {
                move_next_to(tree, dragged, child);
            }
        }
        Outcome::Consume
    }

    fn drag_over(&self) -> Outcome {
        if self.session.is_some() {
            Outcome::Consume
        } else {
            Outcome::Ignored
        }
    }

    fn drag_leave(&mut self, tree: &mut Tree, child: NodeId) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored;
        };
        if session.leave(child) {
            tree.remove_markers(child, Markers::OVER);
        }
        trace!(?child, counter = session.counter(child), "leave");
        Outcome::Continue
    }

    fn drop_on(&mut self, tree: &mut Tree, target: NodeId) -> Outcome {
        let Some(dragged) = self.dragging() else {
            return Outcome::Ignored;
        };
        if target == dragged {
            trace!(?target, "dropped onto itself");
            return Outcome::Consume;
        }
        if self.config.warp && !swap(tree, dragged, target) {
            debug!(?target, ?dragged, "swap refused, drop not committed");
            return Outcome::Consume;
        }
        debug!(?target, ?dragged, warp = self.config.warp, "drop committed");
        if let Some(f) = self.on_change.as_mut() {
            f(target, dragged);
        }
        Outcome::Consume
    }

    fn end_session(&mut self, tree: &mut Tree, reason: &'static str) -> Outcome {
        let Some(session) = self.session.take() else {
            return Outcome::Ignored;
        };
        let mut touched: Vec<NodeId> = recognized_children(tree, self.container, &self.predicate);
        touched.extend(session.entered());
        touched.push(session.dragged());
        for node in touched {
            tree.remove_markers(node, Markers::MOVING | Markers::OVER);
        }
        if let Some(f) = self.on_stop.as_mut() {
            f();
        }
        debug!(dragged = ?session.dragged(), reason, "drag session ended");
        Outcome::Continue
    }

    fn focus_lost(&mut self, tree: &mut Tree) -> Outcome {
        if let Some(gesture) = self.gesture.take() {
            gesture.finish(tree);
        }
        self.end_session(tree, "focus lost")
    }

    // --- synthetic gesture ---

    fn pointer(&mut self, tree: &mut Tree, event: PointerEvent) -> Outcome {
        let hit = tree.hit_test_point(event.position, QueryFilter::PICKING);
        match event.kind {
            PointerEventKind::Down => {
                if self.gesture.is_some() || self.session.is_some() {
                    return Outcome::Ignored;
                }
                let Some(hit) = hit else {
                    return Outcome::Ignored;
                };
                let Some(child) = resolve_child(tree, hit.node, self.container, &self.predicate)
                else {
                    return Outcome::Ignored;
                };
                if !tree.is_draggable(child) {
                    trace!(?child, "press on a child that is not draggable");
                    return Outcome::Ignored;
                }
                self.gesture = Some(SyntheticGesture::begin(tree));
                let _ = self.dispatch(tree, DragEvent::new(DragEventKind::DragStart, hit.node));
                let _ = self.follow(tree, &hit.path);
                Outcome::Consume
            }
            PointerEventKind::Move => {
                if self.gesture.is_none() {
                    return Outcome::Ignored;
                }
                let path = hit.as_ref().map(|h| h.path.clone()).unwrap_or_default();
                let mut out = self.follow(tree, &path);
                if let Some(hit) = hit {
                    out = out.merge(
                        self.dispatch(tree, DragEvent::new(DragEventKind::DragOver, hit.node)),
                    );
                }
                out.merge(Outcome::Continue)
            }
            PointerEventKind::Up => {
                let Some(gesture) = self.gesture.take() else {
                    return Outcome::Ignored;
                };
                if let Some(hit) = hit {
                    let _ = self.dispatch(tree, DragEvent::new(DragEventKind::Drop, hit.node));
                }
                let _ = self.end_session(tree, "pointer released");
                gesture.finish(tree);
                Outcome::Consume
            }
        }
    }

    /// Feed a hit path through the trail and dispatch the resulting crossings.
    fn follow(&mut self, tree: &mut Tree, path: &[NodeId]) -> Outcome {
        let Some(gesture) = self.gesture.as_mut() else {
            return Outcome::Ignored;
        };
        let crossings = gesture.trail.update(path);
        crossings
            .into_iter()
            .fold(Outcome::Ignored, |acc, e| acc.merge(self.dispatch(tree, e)))
    }
}

/// Move `dragged` next to `target`: after it when `dragged` comes first in
/// document order, before it otherwise.
fn move_next_to(tree: &mut Tree, dragged: NodeId, target: NodeId) {
    let Some(parent) = tree.parent(target) else {
        return;
    };
    let reference = if tree.comes_before(dragged, target) {
        tree.next_sibling(target)
    } else {
        Some(target)
    };
    if tree.insert_before(dragged, parent, reference) {
        debug!(?dragged, ?target, "live reorder");
    }
}

/// Exchange the positions of `a` and `b`; every other element keeps its place.
///
/// Returns false without touching the tree when either id is stale or
/// detached, or when one contains the other.
fn swap(tree: &mut Tree, a: NodeId, b: NodeId) -> bool {
    let (Some(pa), Some(pb)) = (tree.parent(a), tree.parent(b)) else {
        return false;
    };
    if tree.contains(a, b) || tree.contains(b, a) {
        return false;
    }
    if tree.next_sibling(b) == Some(a) {
        return tree.insert_before(a, pb, Some(b));
    }
    if tree.next_sibling(a) == Some(b) {
        return tree.insert_before(b, pa, Some(a));
    }
    let a_next = tree.next_sibling(a);
    tree.insert_before(a, pb, Some(b)) && tree.insert_before(b, pa, a_next)
}
