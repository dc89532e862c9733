// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state: the dragged child and per-child enter counters.
//!
//! ## Nested enter/leave
//!
//! A pointer crossing into a child's descendants produces a fresh enter on
//! the descendant before (or without) a leave on the child. Both resolve to
//! the same list child, so a naive handler would drop the child's hover
//! state while the pointer is still inside it. Each child therefore carries
//! a counter: enters increment, leaves decrement (never below zero), and
//! only the 0→1 and →0 transitions are reported.
//!
//! ```
//! # use understory_element_tree::{LocalNode, Tree};
//! use understory_sortable::session::DragSession;
//! # let mut tree = Tree::new();
//! # let li = tree.insert(None, LocalNode::element("li"));
//! # let dragged = tree.insert(None, LocalNode::element("li"));
//! let mut s = DragSession::new(dragged);
//! assert!(s.enter(li));   // item entered
//! assert!(!s.enter(li));  // its label entered
//! assert!(!s.leave(li));  // item left, still inside the label
//! assert!(s.leave(li));   // label left
//! assert!(!s.leave(li));  // stray leave clamps at zero
//! assert_eq!(s.counter(li), 0);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use understory_element_tree::NodeId;

/// State of one drag gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    dragged: NodeId,
    counters: BTreeMap<NodeId, u32>,
}

impl DragSession {
    /// Start a session for `dragged`.
    pub fn new(dragged: NodeId) -> Self {
        Self {
            dragged,
            counters: BTreeMap::new(),
        }
    }

    /// The child being dragged.
    pub fn dragged(&self) -> NodeId {
        self.dragged
    }

    /// Record an enter on `child`; returns true on the 0→1 transition.
    pub fn enter(&mut self, child: NodeId) -> bool {
        let c = self.counters.entry(child).or_insert(0);
        *c = c.saturating_add(1);
        *c == 1
    }

    /// Record a leave on `child`; returns true when the counter drops to zero.
    ///
    /// A leave on a child with a zero counter is absorbed and reports nothing.
    pub fn leave(&mut self, child: NodeId) -> bool {
        match self.counters.get_mut(&child) {
            Some(c) if *c > 0 => {
                *c -= 1;
                if *c == 0 {
                    self.counters.remove(&child);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Current counter of `child`.
    pub fn counter(&self, child: NodeId) -> u32 {
        self.counters.get(&child).copied().unwrap_or(0)
    }

    /// Children with a non-zero counter.
    pub fn entered(&self) -> Vec<NodeId> {
        self.counters.keys().copied().collect()
    }
}
