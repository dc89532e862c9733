// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event delegation: map an event target to the list child that owns it.
//!
//! Events are observed once at the container. The element a platform fires
//! an event on is often a descendant of a list child (a label, an icon), so
//! the controller walks up from the target until it finds an element the
//! [`ChildPredicate`] recognizes.
//!
//! ```
//! use understory_element_tree::{LocalNode, Tree};
//! use understory_sortable::delegate::{ChildPredicate, resolve_child};
//!
//! let mut tree = Tree::new();
//! let ul = tree.insert(None, LocalNode::element("ul"));
//! let li = tree.insert(Some(ul), LocalNode::element("li"));
//! let label = tree.insert(Some(li), LocalNode::element("span"));
//!
//! let p = ChildPredicate::DirectChild;
//! assert_eq!(resolve_child(&tree, label, ul, &p), Some(li));
//! assert_eq!(resolve_child(&tree, ul, ul, &p), None);
//! ```

use alloc::vec::Vec;

use understory_element_tree::{NodeId, Selector, Tree};

/// Which elements of a container count as sortable children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChildPredicate {
    /// Element children of the container.
    #[default]
    DirectChild,
    /// Descendants of the container matching a selector, evaluated per event.
    ///
    /// Elements added after binding are recognized without a rescan.
    Selector(Selector),
}

impl ChildPredicate {
    /// Returns true if `node` is a recognized child of `container`.
    ///
    /// The container itself never qualifies.
    pub fn accepts(&self, tree: &Tree, container: NodeId, node: NodeId) -> bool {
        if node == container {
            return false;
        }
        match self {
            Self::DirectChild => tree.parent(node) == Some(container),
            Self::Selector(sel) => tree.contains(container, node) && sel.matches(tree, node),
        }
    }
}

/// Resolve the recognized child that owns `target`.
///
/// Walks from `target` (inclusive) toward the root and returns the first
/// element accepted by `predicate`. Returns `None` when the walk reaches
/// `container` first, when `target` lies outside the container, or when
/// `target` is stale.
pub fn resolve_child(
    tree: &Tree,
    target: NodeId,
    container: NodeId,
    predicate: &ChildPredicate,
) -> Option<NodeId> {
    let mut cur = Some(target).filter(|t| tree.is_alive(*t));
    while let Some(node) = cur {
        if node == container {
            return None;
        }
        if predicate.accepts(tree, container, node) {
            return Some(node);
        }
        cur = tree.parent(node);
    }
    None
}

/// Every recognized child of `container`, in document order.
pub fn recognized_children(
    tree: &Tree,
    container: NodeId,
    predicate: &ChildPredicate,
) -> Vec<NodeId> {
    match predicate {
        ChildPredicate::DirectChild => tree.children(container).to_vec(),
        ChildPredicate::Selector(_) => {
            let mut out = Vec::new();
            // Pre-order walk over the container's strict descendants.
            let mut stack: Vec<NodeId> = tree.children(container).iter().rev().copied().collect();
            while let Some(node) = stack.pop() {
                if predicate.accepts(tree, container, node) {
                    out.push(node);
                }
                stack.extend(tree.children(node).iter().rev().copied());
            }
            out
        }
    }
}
