// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading controller settings from JSON.
//!
//! Run:
//! - `cargo run -p understory_sortable_demos --example sortable_config`

use understory_element_tree::{LocalNode, Tree};
use understory_sortable::{Sortable, SortableConfig, SortableOptions};

fn main() {
    tracing_subscriber::fmt().init();

    for source in [r#"{}"#, r#"{"warp":true}"#, r#"{"warp":false,"input":"synthetic"}"#] {
        let config: SortableConfig = match serde_json::from_str(source) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{source}: {e}");
                continue;
            }
        };
        let mut tree = Tree::new();
        let ul = tree.insert(None, LocalNode::element("ul"));
        tree.insert(Some(ul), LocalNode::element("li"));
        let sortable =
            Sortable::bind(&mut tree, ul, None, SortableOptions::from_config(config)).unwrap();
        println!("{source:<40} -> {:?}", sortable.config());
    }

    let bad = r#"{"input":"telepathy"}"#;
    if let Err(e) = serde_json::from_str::<SortableConfig>(bad) {
        println!("{bad:<40} -> error: {e}");
    }
}
