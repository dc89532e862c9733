// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable --heading-base-level=0

//! Understory Sortable: a deterministic, `no_std` drag-to-reorder controller.
//!
//! ## Overview
//!
//! A [`Sortable`] is bound to one container element of an
//! [`understory_element_tree::Tree`]. The user drags one child over its
//! siblings and the controller moves the underlying elements to match,
//! calling back when a drop completes.
//!
//! It does not render, lay out, or talk to a platform. Hosts translate their
//! input into [`InputEvent`] values and feed them to [`Sortable::handle`];
//! the observable results are the reordered tree, the `moving`/`over`
//! [`Markers`](understory_element_tree::Markers) on children, and the
//! callbacks in [`SortableOptions`].
//!
//! ## Delegation
//!
//! Events are observed at the container. The controller maps each event
//! target to the sortable child that owns it with
//! [`resolve_child`](crate::delegate::resolve_child); events outside any
//! child are [`Outcome::Ignored`]. By default the container's element children
//! are sortable; pass a selector to [`Sortable::bind`] to match descendants
//! instead.
//!
//! ## Hover debouncing
//!
//! Nested elements inside a child fire their own enter/leave notifications.
//! A per-child counter in the [`DragSession`](crate::session::DragSession)
//! keeps the `over` marker on while the pointer is anywhere inside the child.
//!
//! ## Reordering
//!
//! - Live (default): entering a sibling moves the dragged child after it when
//!   the dragged child comes first, and before it otherwise.
//! - Warp ([`SortableConfig::warp`]): nothing moves while hovering; a drop
//!   swaps the dragged child with the drop target.
//!
//! ## Input paths
//!
//! [`InputMode::detect`] picks native drag events when the platform has them
//! and a synthetic gesture built from pointer down/move/up otherwise. The
//! synthetic path hit-tests the tree, derives enter/leave crossings with a
//! [`PointerTrail`](crate::pointer::PointerTrail), and suppresses document
//! text selection and native drag while the pointer is held.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_element_tree::{LocalNode, Tree};
//! use understory_sortable::{DragEvent, DragEventKind::*, Sortable, SortableOptions};
//!
//! let mut tree = Tree::new();
//! let ul = tree.insert(None, LocalNode::element("ul"));
//! let items: Vec<_> = (0..3)
//!     .map(|_| tree.insert(Some(ul), LocalNode::element("li")))
//!     .collect();
//! let (a, b, c) = (items[0], items[1], items[2]);
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let log = changes.clone();
//! let options = SortableOptions::new().with_change(move |target, dragged| {
//!     log.borrow_mut().push((target, dragged));
//! });
//! let mut sortable = Sortable::bind(&mut tree, ul, None, options).unwrap();
//! assert!(tree.is_draggable(a));
//!
//! for (kind, target) in [(DragStart, a), (DragEnter, c), (Drop, c), (DragEnd, a)] {
//!     sortable.handle(&mut tree, DragEvent::new(kind, target));
//! }
//!
//! assert_eq!(tree.children(ul), &[b, c, a]);
//! assert_eq!(*changes.borrow(), vec![(c, a)]);
//! assert_eq!(sortable.dragging(), None);
//! ```
//!
//! ## Logging
//!
//! Session transitions are reported through `tracing` at `debug` level and
//! per-event bookkeeping at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod delegate;
pub mod pointer;
pub mod session;
pub mod types;

mod options;
mod sortable;

pub use delegate::ChildPredicate;
pub use options::{ChangeFn, LifecycleFn, SortableConfig, SortableOptions};
pub use sortable::{BindError, Sortable};
pub use types::{
    DragEvent, DragEventKind, InputEvent, InputMode, Outcome, PlatformSupport, PointerEvent,
    PointerEventKind,
};
