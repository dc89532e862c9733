// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element_tree --heading-base-level=0

//! Understory Element Tree: an ordered element tree for interactive lists.
//!
//! Understory Element Tree is the document model the
//! [`understory_sortable`](https://docs.rs/understory_sortable) controller
//! operates on. It mirrors the parts of a UI document a drag-to-reorder
//! interaction cares about:
//!
//! - A hierarchy of elements with children kept in document order.
//! - DOM-style moves via [`Tree::insert_before`], which detach and reinsert in one step.
//! - Tag names and class tokens, matched by a small [`Selector`] language.
//! - [`NodeFlags`] for visibility, picking, and the draggable capability.
//! - Presentation [`Markers`] (`moving`, `over`) that styling can consume.
//! - Document-wide [`DocumentBehavior`] toggles (text selection, native drag).
//! - Point hit testing over world-space AABBs, returning the root→target path.
//!
//! ## Not a layout engine
//!
//! Reordering elements never changes their geometry.
//! Upstream code is expected to lay out the list after a move and push the
//! new bounds with [`Tree::set_local_bounds`] or [`Tree::set_local_transform`].
//!
//! ## API overview
//!
//! - [`Tree`]: container managing elements, order, markers, and queries.
//! - [`LocalNode`]: per-element data (tag, classes, bounds, transform, z, flags).
//! - [`NodeId`]: generational handle of an element.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use understory_element_tree::{LocalNode, Markers, QueryFilter, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let ul = tree.insert(
//!     None,
//!     LocalNode::element("ul").with_bounds(Rect::new(0.0, 0.0, 200.0, 90.0)),
//! );
//! let a = tree.insert(
//!     Some(ul),
//!     LocalNode::element("li").with_bounds(Rect::new(0.0, 0.0, 200.0, 30.0)),
//! );
//! let b = tree.insert(
//!     Some(ul),
//!     LocalNode::element("li").with_bounds(Rect::new(0.0, 30.0, 200.0, 60.0)),
//! );
//!
//! // Move `b` in front of `a`.
//! assert!(tree.insert_before(b, ul, Some(a)));
//! assert_eq!(tree.children(ul), &[b, a]);
//!
//! // Mark and hit-test.
//! tree.add_markers(a, Markers::OVER);
//! assert_eq!(tree.class_list(a), vec!["over"]);
//! let hit = tree.hit_test_point(Point::new(10.0, 40.0), QueryFilter::PICKING).unwrap();
//! assert_eq!(hit.path, vec![ul, b]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod selector;
mod tree;
mod types;
mod util;

pub use selector::{Selector, SelectorError};
pub use tree::{Hit, QueryFilter, Tree};
pub use types::{DocumentBehavior, LocalNode, Markers, NodeFlags, NodeId};
