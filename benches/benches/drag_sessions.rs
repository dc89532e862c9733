// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_element_tree::{LocalNode, NodeId, QueryFilter, Tree};
use understory_sortable::{
    DragEvent, DragEventKind, InputMode, PointerEvent, PointerEventKind, Sortable,
    SortableOptions,
};

const ROW: f64 = 20.0;

/// A `ul` of `n` rows, each `li` holding two nested spans.
fn gen_list(n: usize) -> (Tree, NodeId, Vec<NodeId>) {
    let mut tree = Tree::new();
    let ul = tree.insert(
        None,
        LocalNode::element("ul").with_bounds(Rect::new(0.0, 0.0, 200.0, n as f64 * ROW)),
    );
    let mut items = Vec::with_capacity(n);
    for i in 0..n {
        let y = i as f64 * ROW;
        let li = tree.insert(
            Some(ul),
            LocalNode::element("li")
                .with_class("row")
                .with_bounds(Rect::new(0.0, y, 200.0, y + ROW)),
        );
        let label = tree.insert(
            Some(li),
            LocalNode::element("span").with_bounds(Rect::new(4.0, y + 2.0, 120.0, y + 18.0)),
        );
        tree.insert(
            Some(label),
            LocalNode::element("em").with_bounds(Rect::new(8.0, y + 4.0, 40.0, y + 16.0)),
        );
        items.push(li);
    }
    (tree, ul, items)
}

/// Native events for dragging the first row across every other row, label first.
fn sweep_events(tree: &Tree, items: &[NodeId]) -> Vec<DragEvent> {
    use DragEventKind::{DragEnd, DragEnter, DragLeave, DragOver, DragStart, Drop};
    let mut out = vec![DragEvent::new(DragStart, items[0])];
    let mut prev: Option<NodeId> = None;
    for &li in &items[1..] {
        let label = tree.children(li)[0];
        if let Some(p) = prev {
            out.push(DragEvent::new(DragLeave, p));
        }
        out.push(DragEvent::new(DragEnter, li));
        out.push(DragEvent::new(DragEnter, label));
        out.push(DragEvent::new(DragLeave, li));
        out.push(DragEvent::new(DragOver, label));
        prev = Some(label);
    }
    let last = *items.last().unwrap();
    out.push(DragEvent::new(Drop, last));
    out.push(DragEvent::new(DragEnd, items[0]));
    out
}

fn bench_native(c: &mut Criterion) {
    let mut group = c.benchmark_group("native");
    for &n in &[64usize, 256, 1024] {
        let (tree, ul, items) = gen_list(n);
        let events = sweep_events(&tree, &items);
        group.throughput(Throughput::Elements(events.len() as u64));
        for warp in [false, true] {
            let mode = if warp { "warp" } else { "live" };
            group.bench_function(format!("sweep_{mode}_n{n}"), |b| {
                b.iter_batched(
                    || tree.clone(),
                    |mut tree| {
                        let mut s =
                            Sortable::bind(&mut tree, ul, None, SortableOptions::new().warp(warp))
                                .unwrap();
                        for &e in &events {
                            black_box(s.handle(&mut tree, e));
                        }
                        black_box(tree.children(ul).len());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");
    let (tree, ul, items) = gen_list(256);
    let events = sweep_events(&tree, &items);
    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("sweep_li_row_n256", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                let mut s =
                    Sortable::bind(&mut tree, ul, Some("li.row"), SortableOptions::new()).unwrap();
                for &e in &events {
                    black_box(s.handle(&mut tree, e));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_synthetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthetic");
    for &n in &[64usize, 256] {
        let (tree, ul, _) = gen_list(n);
        let moves: Vec<Point> = (0..n)
            .map(|i| Point::new(150.0, i as f64 * ROW + ROW / 2.0))
            .collect();
        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_function(format!("press_move_release_n{n}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    let opts = SortableOptions::new().warp(true).input(InputMode::Synthetic);
                    let mut s = Sortable::bind(&mut tree, ul, None, opts).unwrap();
                    let down = PointerEvent::new(PointerEventKind::Down, moves[0]);
                    black_box(s.handle(&mut tree, down));
                    for &p in &moves[1..] {
                        let ev = PointerEvent::new(PointerEventKind::Move, p);
                        black_box(s.handle(&mut tree, ev));
                    }
                    let up = PointerEvent::new(PointerEventKind::Up, moves[n - 1]);
                    black_box(s.handle(&mut tree, up));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("hit_test_n{n}"), |b| {
            b.iter(|| {
                for &p in &moves {
                    black_box(tree.hit_test_point(p, QueryFilter::PICKING));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_native, bench_selector, bench_synthetic);
criterion_main!(benches);
