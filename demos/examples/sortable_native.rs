// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live reordering driven by native drag events.
//!
//! Drags the first item of a five-item list over the fourth, with the nested
//! enter/leave noise a real platform produces when crossing item labels.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_sortable_demos --example sortable_native`

use std::cell::RefCell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use understory_element_tree::{LocalNode, NodeId, Tree};
use understory_sortable::{DragEvent, DragEventKind, Sortable, SortableOptions};

fn names(tree: &Tree, ul: NodeId, labels: &[(NodeId, &str)]) -> Vec<String> {
    tree.children(ul)
        .iter()
        .map(|id| {
            let name = labels
                .iter()
                .find(|(n, _)| n == id)
                .map_or("?", |(_, s)| s);
            let markers: Vec<_> = tree.markers(*id).tokens().collect();
            if markers.is_empty() {
                name.to_string()
            } else {
                format!("{name}[{}]", markers.join(" "))
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Tree::new();
    let ul = tree.insert(None, LocalNode::element("ul"));
    let mut labels = Vec::new();
    let mut spans = Vec::new();
    for name in ["A", "B", "C", "D", "E"] {
        let li = tree.insert(Some(ul), LocalNode::element("li"));
        spans.push(tree.insert(Some(li), LocalNode::element("span")));
        labels.push((li, name));
    }
    let item = |i: usize| labels[i].0;

    let changes = Rc::new(RefCell::new(Vec::new()));
    let log = changes.clone();
    let options = SortableOptions::new()
        .with_change(move |target, dragged| log.borrow_mut().push((target, dragged)))
        .with_start(|| println!("-- drag started"))
        .with_stop(|| println!("-- drag stopped"));
    let mut sortable = Sortable::bind(&mut tree, ul, None, options).unwrap();

    use DragEventKind::{DragEnd, DragEnter, DragLeave, DragOver, Drop};
    let steps = [
        (DragEventKind::DragStart, item(0)),
        (DragEnter, item(1)),
        (DragEnter, spans[1]),
        (DragLeave, item(1)),
        (DragLeave, spans[1]),
        (DragEnter, item(2)),
        (DragLeave, item(2)),
        (DragEnter, item(3)),
        (DragOver, spans[3]),
        (Drop, spans[3]),
        (DragEnd, item(0)),
    ];

    println!("before: {:?}", names(&tree, ul, &labels));
    for (kind, target) in steps {
        let outcome = sortable.handle(&mut tree, DragEvent::new(kind, target));
        println!(
            "{kind:?} -> {outcome:?}  {:?}",
            names(&tree, ul, &labels)
        );
    }

    for (target, dragged) in changes.borrow().iter() {
        let name = |id: &NodeId| labels.iter().find(|(n, _)| n == id).map_or("?", |(_, s)| s);
        println!("change: dropped {} onto {}", name(dragged), name(target));
    }
}
