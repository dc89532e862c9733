// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, moves, markers, and queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{DocumentBehavior, LocalNode, Markers, NodeFlags, NodeId};
use crate::util::transform_rect_bbox;

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// An element tree with ordered children.
///
/// Every element keeps its children in document order. Moves go through
/// [`Tree::insert_before`], which detaches the element from its old position
/// first, the way DOM insertion does.
#[derive(Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    document: DocumentBehavior,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub node: NodeId,
    /// Path from root to element (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Tree::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider elements marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider elements marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Visible and pickable elements only.
    pub const PICKING: Self = Self {
        visible_only: true,
        pickable_only: true,
    };

    fn admits(self, flags: NodeFlags) -> bool {
        !(self.visible_only && !flags.contains(NodeFlags::VISIBLE)
            || self.pickable_only && !flags.contains(NodeFlags::PICKABLE))
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    markers: Markers,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            markers: Markers::empty(),
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            document: DocumentBehavior::default(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link(id, p, None);
        }
        id
    }

    /// Remove an element (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        self.unlink(id);
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            // Children still point at `id`; clear so the recursive unlink is a no-op.
            self.node_mut(child).parent = None;
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` into `parent`, immediately before `reference`.
    ///
    /// With `reference == None` the element is appended. The element is
    /// detached from its current position first, so this also reorders
    /// siblings. Inserting an element before itself leaves it in place.
    ///
    /// Returns `false` and changes nothing when any id is stale, when
    /// `reference` is not a child of `parent`, or when `parent` lies inside
    /// the subtree of `id`.
    pub fn insert_before(&mut self, id: NodeId, parent: NodeId, reference: Option<NodeId>) -> bool {
        if !self.is_alive(id) || !self.is_alive(parent) || self.contains(id, parent) {
            return false;
        }
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return false;
            }
            if r == id {
                return true;
            }
        }
        self.unlink(id);
        self.link(id, parent, reference);
        true
    }

    /// Move `id` to the end of `parent`'s children.
    pub fn append(&mut self, id: NodeId, parent: NodeId) -> bool {
        self.insert_before(id, parent, None)
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Parent of an element, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element in document order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Position of an element among its siblings.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// The sibling right after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// The sibling right before `id`.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        idx.checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Returns true if `a` and `b` are siblings and `a` comes first.
    pub fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(pa), Some(pb)) = (self.parent(a), self.parent(b)) else {
            return false;
        };
        if pa != pb {
            return false;
        }
        match (self.index_in_parent(a), self.index_in_parent(b)) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }

    /// Returns true if `a` comes before `b` in document (pre-order) order.
    ///
    /// An ancestor comes before its descendants. Returns false when either id
    /// is stale, when `a == b`, or when the two live in different roots.
    pub fn comes_before(&self, a: NodeId, b: NodeId) -> bool {
        let (pa, pb) = (self.path_to_root(a), self.path_to_root(b));
        if pa.is_empty() || pb.is_empty() || pa[0] != pb[0] {
            return false;
        }
        // First diverging level decides; otherwise the shorter path is the ancestor.
        match pa.iter().zip(&pb).position(|(x, y)| x != y) {
            Some(i) => match (self.index_in_parent(pa[i]), self.index_in_parent(pb[i])) {
                (Some(ia), Some(ib)) => ia < ib,
                _ => false,
            },
            None => pa.len() < pb.len(),
        }
    }

    /// Returns true if `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node).filter(|n| self.is_alive(*n));
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Path from the root to `id` (inclusive); empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id).filter(|n| self.is_alive(*n));
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent(n);
        }
        out.reverse();
        out
    }

    /// Element name.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.local.tag.as_str())
    }

    /// Author classes followed by the tokens of the current markers.
    pub fn class_list(&self, id: NodeId) -> Vec<&str> {
        let Some(n) = self.node_opt(id) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = n.local.classes.iter().map(|c| c.as_str()).collect();
        for token in n.markers.tokens() {
            out.push(token);
        }
        out
    }

    /// Returns true if `name` is an author class or a marker token on `id`.
    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.node_opt(id).is_some_and(|n| {
            n.local.classes.iter().any(|c| c == name) || n.markers.tokens().any(|t| t == name)
        })
    }

    /// Element flags.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Update element flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Set or clear [`NodeFlags::DRAGGABLE`].
    pub fn set_draggable(&mut self, id: NodeId, draggable: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags.set(NodeFlags::DRAGGABLE, draggable);
        }
    }

    /// Returns true if the element can start a drag gesture.
    pub fn is_draggable(&self, id: NodeId) -> bool {
        matches!(self.flags(id), Some(f) if f.contains(NodeFlags::DRAGGABLE))
    }

    /// Current markers; empty for stale ids.
    pub fn markers(&self, id: NodeId) -> Markers {
        self.node_opt(id).map(|n| n.markers).unwrap_or_default()
    }

    /// Add markers to an element.
    pub fn add_markers(&mut self, id: NodeId, markers: Markers) {
        if let Some(n) = self.node_opt_mut(id) {
            n.markers.insert(markers);
        }
    }

    /// Remove markers from an element.
    pub fn remove_markers(&mut self, id: NodeId, markers: Markers) {
        if let Some(n) = self.node_opt_mut(id) {
            n.markers.remove(markers);
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_bounds = bounds;
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Returns the z-index of an element if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.node_opt(id).map(|n| n.local.z_index)
    }

    /// World-space AABB of an element's bounds.
    ///
    /// Conservative under rotation and shear.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        Some(transform_rect_bbox(
            self.world_transform(id),
            node.local.local_bounds,
        ))
    }

    /// Hit test a world-space point. Returns the topmost element.
    ///
    /// Higher `z_index` wins; on equal z the deeper element wins, so a label
    /// inside a list item beats the item; after that the newer [`NodeId`] wins.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(NodeId, i32, usize)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot else {
                continue;
            };
            if !filter.admits(node.local.flags) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, node.generation);
            let world = transform_rect_bbox(self.world_transform(id), node.local.local_bounds);
            if !world.contains(pt) {
                continue;
            }
            let z = node.local.z_index;
            let depth = self.depth(id);
            let better = match best {
                None => true,
                Some((best_id, z_best, d_best)) => {
                    z > z_best
                        || (z == z_best && depth > d_best)
                        || (z == z_best && depth == d_best && Self::id_is_newer(id, best_id))
                }
            };
            if better {
                best = Some((id, z, depth));
            }
        }
        best.map(|(node, _, _)| Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    /// Document-wide default behaviors currently enabled.
    pub fn document_behavior(&self) -> DocumentBehavior {
        self.document
    }

    /// Replace the document-wide default behaviors.
    pub fn set_document_behavior(&mut self, behavior: DocumentBehavior) {
        self.document = behavior;
    }

    // --- internals ---

    #[inline]
    fn id_is_newer(a: NodeId, b: NodeId) -> bool {
        (a.generation() > b.generation()) || (a.generation() == b.generation() && a.0 > b.0)
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.generation())
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.generation())
    }

    /// Access a node mutably; panics if `id` is stale. Callers check liveness first.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    fn world_transform(&self, id: NodeId) -> Affine {
        let mut tf = Affine::IDENTITY;
        let mut cur = Some(id);
        while let Some(n) = cur {
            let Some(node) = self.node_opt(n) else {
                break;
            };
            tf = node.local.local_transform * tf;
            cur = node.parent;
        }
        tf
    }

    fn link(&mut self, id: NodeId, parent: NodeId, reference: Option<NodeId>) {
        let p = self.node_mut(parent);
        let at = reference
            .and_then(|r| p.children.iter().position(|c| *c == r))
            .unwrap_or(p.children.len());
        p.children.insert(at, id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).parent.take() else {
            return;
        };
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
    }
}
