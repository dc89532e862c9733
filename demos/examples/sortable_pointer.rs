// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic drag gesture from pointer input.
//!
//! For platforms without native drag and drop, the controller hit-tests the
//! tree on every pointer move and derives enter/leave crossings itself.
//! The host re-runs layout after each event, as a real UI would.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_sortable_demos --example sortable_pointer`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_element_tree::{LocalNode, NodeId, Tree};
use understory_sortable::{
    InputMode, PlatformSupport, PointerEvent, PointerEventKind, Sortable, SortableOptions,
};

const ROW: f64 = 24.0;

fn layout(tree: &mut Tree, ul: NodeId) {
    let rows = tree.children(ul).to_vec();
    tree.set_local_bounds(ul, Rect::new(0.0, 0.0, 160.0, rows.len() as f64 * ROW));
    for (i, li) in rows.into_iter().enumerate() {
        let y = i as f64 * ROW;
        tree.set_local_bounds(li, Rect::new(0.0, y, 160.0, y + ROW));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::new();
    let ul = tree.insert(None, LocalNode::element("ul"));
    let items: Vec<NodeId> = (0..4)
        .map(|_| tree.insert(Some(ul), LocalNode::element("li")))
        .collect();
    layout(&mut tree, ul);

    let input = InputMode::detect(PlatformSupport { native_drag: false });
    let options = SortableOptions::new()
        .input(input)
        .with_change(|target, dragged| println!("dropped {dragged:?} onto {target:?}"));
    let mut sortable = Sortable::bind(&mut tree, ul, None, options).unwrap();

    let row = |i: usize| Point::new(80.0, i as f64 * ROW + ROW / 2.0);
    let gesture = [
        (PointerEventKind::Down, row(0)),
        (PointerEventKind::Move, row(1)),
        (PointerEventKind::Move, row(2)),
        (PointerEventKind::Move, row(3)),
        (PointerEventKind::Up, row(3)),
    ];
    for (kind, at) in gesture {
        let outcome = sortable.handle(&mut tree, PointerEvent::new(kind, at));
        layout(&mut tree, ul);
        let order: Vec<usize> = tree
            .children(ul)
            .iter()
            .filter_map(|id| items.iter().position(|i| i == id))
            .collect();
        println!(
            "{kind:?} at y={:>5.1} -> {outcome:?} order={order:?} document={:?}",
            at.y,
            tree.document_behavior()
        );
    }
}
