// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swap-on-drop ("warp") reordering.
//!
//! Nothing moves while hovering; the drop exchanges the dragged item with
//! the drop target. Children are recognized by a selector, so only the
//! `.card` descendants of the board take part.
//!
//! Run:
//! - `RUST_LOG=understory_sortable=trace cargo run -p understory_sortable_demos --example sortable_warp`

use tracing_subscriber::EnvFilter;
use understory_element_tree::{LocalNode, NodeId, Tree};
use understory_sortable::{DragEvent, DragEventKind, Outcome, Sortable, SortableOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::new();
    let board = tree.insert(None, LocalNode::element("section"));
    let header = tree.insert(Some(board), LocalNode::element("h2"));
    let column = tree.insert(Some(board), LocalNode::element("div").with_class("column"));
    let cards: Vec<NodeId> = (0..3)
        .map(|_| tree.insert(Some(column), LocalNode::element("div").with_class("card")))
        .collect();

    let options = SortableOptions::new()
        .warp(true)
        .with_change(|target, dragged| println!("swapped {dragged:?} with {target:?}"));
    let mut sortable = Sortable::bind(&mut tree, board, Some("div.card"), options).unwrap();
    println!("header draggable: {}", tree.is_draggable(header));
    println!("cards draggable:  {}", cards.iter().all(|&c| tree.is_draggable(c)));

    let (a, b, c) = (cards[0], cards[1], cards[2]);
    for (kind, target) in [
        (DragEventKind::DragStart, a),
        (DragEventKind::DragEnter, b),
        (DragEventKind::DragLeave, b),
        (DragEventKind::DragEnter, header),
        (DragEventKind::DragEnter, c),
        (DragEventKind::Drop, c),
        (DragEventKind::DragEnd, a),
    ] {
        let outcome = sortable.handle(&mut tree, DragEvent::new(kind, target));
        if outcome == Outcome::Consume {
            println!("{kind:?}: prevent default");
        } else {
            println!("{kind:?}: {outcome:?}");
        }
    }

    assert_eq!(tree.children(column), &[c, b, a]);
    println!("order: {:?}", tree.children(column));
}
