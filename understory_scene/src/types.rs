// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, and local layout.

use kurbo::{Affine, Rect, Size};

/// Identifier for a node in the scene.
///
/// A small, copyable handle consisting of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale ids never alias a different live node because the generation must match.
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling painting, hit testing, and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are painted and participate in hit testing.
        const VISIBLE          = 0b0000_0001;
        /// Node itself can be returned by a hit test. Children are unaffected.
        const HIT_TEST_VISIBLE = 0b0000_0010;
        /// Node is an interactive control (button, text field, ...).
        const INTERACTIVE      = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::HIT_TEST_VISIBLE
    }
}

/// Local layout for a node, as produced by an upstream layout pass.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Render size. Local bounds are `(0, 0)` to `size`.
    pub size: Size,
    /// Transform from this node's local space into its parent's space.
    pub transform: Affine,
    /// Painting, hit-testing, and interactivity flags.
    pub flags: NodeFlags,
}

impl LocalNode {
    /// A visible, hit-testable node of the given size placed at `origin` in its parent.
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            transform: Affine::translate((x, y)),
            ..Self::default()
        }
    }

    /// Mark this node as an interactive control.
    pub fn interactive(mut self) -> Self {
        self.flags |= NodeFlags::INTERACTIVE;
        self
    }

    /// Local bounds, with origin at `(0, 0)`.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size)
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            transform: Affine::IDENTITY,
            flags: NodeFlags::default(),
        }
    }
}
