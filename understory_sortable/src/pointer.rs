// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic drag gesture for platforms without native drag and drop.
//!
//! ## Usage
//!
//! Pointer moves carry a position, not a target, so the controller hit-tests
//! the tree and hands the resulting root→target path to a [`PointerTrail`].
//! The trail diffs it against the previous path and produces the same
//! `DragLeave` / `DragEnter` notifications a native platform would fire:
//!
//! - Leaves are emitted from inner-most to outer-most.
//! - Enters are emitted from outer-most to inner-most.
//!
//! ```
//! # use understory_element_tree::{LocalNode, Tree};
//! use understory_sortable::DragEvent;
//! use understory_sortable::pointer::PointerTrail;
//! use understory_sortable::types::DragEventKind::{DragEnter, DragLeave};
//! # let mut tree = Tree::new();
//! # let ul = tree.insert(None, LocalNode::element("ul"));
//! # let a = tree.insert(Some(ul), LocalNode::element("li"));
//! # let b = tree.insert(Some(ul), LocalNode::element("li"));
//! let mut trail = PointerTrail::new();
//! let kinds = |evs: Vec<DragEvent>| -> Vec<_> { evs.iter().map(|e| (e.kind, e.target)).collect() };
//! assert_eq!(kinds(trail.update(&[ul, a])), vec![(DragEnter, ul), (DragEnter, a)]);
//! assert_eq!(kinds(trail.update(&[ul, b])), vec![(DragLeave, a), (DragEnter, b)]);
//! ```

use alloc::vec::Vec;

use understory_element_tree::{DocumentBehavior, NodeId, Tree};

use crate::types::{DragEvent, DragEventKind};

/// Tracks the root→target path under a pressed pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerTrail {
    current: Vec<NodeId>,
}

impl PointerTrail {
    /// An empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current root→target path.
    pub fn path(&self) -> &[NodeId] {
        &self.current
    }

    /// Move to `path`, returning the leave and enter events for the transition.
    pub fn update(&mut self, path: &[NodeId]) -> Vec<DragEvent> {
        // Shared ancestry is the common prefix.
        let shared = self
            .current
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        for &k in self.current[shared..].iter().rev() {
            out.push(DragEvent::new(DragEventKind::DragLeave, k));
        }
        for &k in &path[shared..] {
            out.push(DragEvent::new(DragEventKind::DragEnter, k));
        }

        self.current.clear();
        self.current.extend_from_slice(path);
        out
    }

    /// Forget the path without producing events.
    pub fn reset(&mut self) {
        self.current.clear();
    }
}

/// A pressed pointer driving a synthetic drag.
#[derive(Clone, Debug)]
pub(crate) struct SyntheticGesture {
    pub(crate) trail: PointerTrail,
    saved: DocumentBehavior,
}

impl SyntheticGesture {
    const SUPPRESSED: DocumentBehavior =
        DocumentBehavior::TEXT_SELECTION.union(DocumentBehavior::NATIVE_DRAG);

    /// Suppress text selection and native drag for the duration of the gesture.
    pub(crate) fn begin(tree: &mut Tree) -> Self {
        let saved = tree.document_behavior();
        tree.set_document_behavior(saved.difference(Self::SUPPRESSED));
        Self {
            trail: PointerTrail::new(),
            saved,
        }
    }

    /// Restore the document behaviors in effect before [`Self::begin`].
    pub(crate) fn finish(self, tree: &mut Tree) {
        tree.set_document_behavior(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_element_tree::LocalNode;

    use crate::types::DragEventKind::{DragEnter, DragLeave};

    fn nodes(n: usize) -> Vec<NodeId> {
        let mut tree = Tree::new();
        (0..n)
            .map(|_| tree.insert(None, LocalNode::element("div")))
            .collect()
    }

    fn pairs(evs: Vec<DragEvent>) -> Vec<(DragEventKind, NodeId)> {
        evs.into_iter().map(|e| (e.kind, e.target)).collect()
    }

    #[test]
    fn fresh_path_enters_outer_to_inner() {
        let n = nodes(3);
        let mut t = PointerTrail::new();
        assert_eq!(
            pairs(t.update(&n)),
            vec![(DragEnter, n[0]), (DragEnter, n[1]), (DragEnter, n[2])]
        );
        assert_eq!(t.path(), n.as_slice());
    }

    #[test]
    fn branch_change_leaves_inner_first() {
        let n = nodes(4);
        let mut t = PointerTrail::new();
        let _ = t.update(&[n[0], n[1], n[2]]);
        assert_eq!(
            pairs(t.update(&[n[0], n[3]])),
            vec![(DragLeave, n[2]), (DragLeave, n[1]), (DragEnter, n[3])]
        );
    }

    #[test]
    fn empty_path_leaves_everything() {
        let n = nodes(2);
        let mut t = PointerTrail::new();
        let _ = t.update(&n);
        assert_eq!(
            pairs(t.update(&[])),
            vec![(DragLeave, n[1]), (DragLeave, n[0])]
        );
        assert!(t.path().is_empty());
    }

    #[test]
    fn same_path_is_quiet() {
        let n = nodes(2);
        let mut t = PointerTrail::new();
        let _ = t.update(&n);
        assert!(t.update(&n).is_empty());
        t.reset();
        assert_eq!(t.update(&n).len(), 2);
    }

    #[test]
    fn gesture_suppresses_and_restores_document_behavior() {
        let mut tree = Tree::new();
        let g = SyntheticGesture::begin(&mut tree);
        assert!(tree.document_behavior().is_empty());
        g.finish(&mut tree);
        assert_eq!(tree.document_behavior(), DocumentBehavior::all());
    }
}
