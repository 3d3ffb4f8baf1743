// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flash a highlight over a button and watch it pulse, then expire.
//!
//! Builds a small window with two buttons in an `understory_scene` tree, triggers a
//! highlight on a label nested inside one of them, and drives a simulated clock at
//! roughly 10 frames per second, printing what each frame paints.
//!
//! Run:
//! - `cargo run -p understory_highlight_demos --example highlight_flash`
//! - `RUST_LOG=understory_highlight=debug cargo run -p understory_highlight_demos --example highlight_flash`

use std::time::Duration;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_highlight::adapters::scene::is_interactive;
use understory_highlight::{
    DisplayItem, DisplayList, HighlightConfig, Highlighter, OverlayId, ThreadAffinity,
};
use understory_scene::{LocalNode, Tree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut tree: Tree<OverlayId> = Tree::new();
    let window = tree.insert(None, LocalNode::at(0.0, 0.0, 800.0, 600.0));
    let toolbar = tree.insert(Some(window), LocalNode::at(0.0, 80.0, 800.0, 60.0));
    let ok = tree.insert(
        Some(toolbar),
        LocalNode::at(100.0, 20.0, 50.0, 20.0).interactive(),
    );
    let _label = tree.insert(Some(ok), LocalNode::at(5.0, 2.0, 40.0, 16.0));
    let _cancel = tree.insert(
        Some(toolbar),
        LocalNode::at(200.0, 20.0, 60.0, 20.0).interactive(),
    );

    let config = HighlightConfig::default().with_duration(Duration::from_millis(1_200));
    let mut highlighter =
        Highlighter::<Tree<OverlayId>, _>::with_context(is_interactive, ThreadAffinity::current())
            .with_config(config)
            .expect("valid config");

    let mut now = Duration::from_secs(1);

    // A click on empty background highlights nothing.
    let miss = highlighter
        .trigger(&mut tree, window, Point::new(500.0, 400.0), now)
        .expect("on the owning thread");
    println!("background click -> {miss:?}");

    // A click on the label bubbles up to its button.
    let id = highlighter
        .trigger(&mut tree, window, Point::new(110.0, 105.0), now)
        .expect("on the owning thread")
        .expect("the label sits inside a button");
    let overlay = highlighter.overlay(id).expect("just activated");
    println!(
        "highlighting {:?}: target {:?}, dimmed area {}",
        id,
        overlay.pulse().base_rect(),
        overlay.mask().area(),
    );

    let frame = Duration::from_millis(100);
    let mut list = DisplayList::new();
    while highlighter.active_count() > 0 {
        list.clear();
        highlighter
            .render(now, &mut list)
            .expect("on the owning thread");
        for item in list.items() {
            match item {
                DisplayItem::Fill { color, .. } => println!("  t={now:?} fill mask {color:?}"),
                DisplayItem::Stroke { rect, width, .. } => {
                    println!("  t={now:?} stroke {rect:?} width {width}");
                }
            }
        }

        now += frame;
        let expired = highlighter
            .tick(&mut tree, now)
            .expect("on the owning thread");
        if expired > 0 {
            tracing::info!(?now, expired, "overlays expired");
        }
    }

    let layer_len = tree.layer(window).map_or(0, |layer| layer.len());
    println!("overlay layer now holds {layer_len} overlay(s)");
}
