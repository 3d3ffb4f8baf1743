// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit resolution: map a point to the nearest interactive element under it.

use kurbo::Point;

use crate::scene::SceneGraph;

/// Resolve `point` (in `root`'s local space) to the nearest interactive element.
///
/// Hit tests for the topmost node, then walks from that node up to `root`
/// (self first) and returns the first node for which `is_interactive` holds.
/// Returns `None` when nothing is hit or no node on the chain qualifies.
/// The walk stops at `root`, so controls above it are never returned.
pub fn resolve_target<S: SceneGraph>(
    scene: &S,
    root: S::Node,
    point: Point,
    is_interactive: impl Fn(&S, S::Node) -> bool,
) -> Option<S::Node> {
    let mut current = scene.hit_test(root, point)?;
    loop {
        if is_interactive(scene, current) {
            tracing::trace!(node = ?current, "interactive ancestor found");
            return Some(current);
        }
        if current == root {
            break;
        }
        current = scene.parent_of(current)?;
    }
    tracing::trace!(?point, "no interactive ancestor");
    None
}
