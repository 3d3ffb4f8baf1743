// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract: the narrow scene-graph and render-surface queries the core relies on.
//!
//! The scene graph is owned by the host. The core only holds node handles for the
//! duration of one activation and never retains them past an overlay's lifetime,
//! except for the root whose overlay layer the overlay was attached to. That root
//! handle acts as a weak reference: if the host drops the root, detaching becomes
//! a no-op.

use core::fmt::Debug;

use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};

use crate::types::{OverlayId, Rgba8};

/// Read queries over a host scene graph plus access to its overlay layers.
pub trait SceneGraph {
    /// Node handle. Cheap to copy and compare; may go stale.
    type Node: Copy + Eq + Debug;
    /// Overlay layer type.
    type Layer: OverlayLayer;

    /// Topmost node under `point`, given in `root`'s local space.
    fn hit_test(&self, root: Self::Node, point: Point) -> Option<Self::Node>;

    /// Parent of `node`, or `None` for roots and stale handles.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Current render size of `node`, or `None` for stale handles.
    fn render_size(&self, node: Self::Node) -> Option<Size>;

    /// Transform from `node`'s local space into `ancestor`'s local space.
    ///
    /// `None` if `ancestor` is neither `node` nor one of its ancestors.
    fn transform_to_ancestor(&self, node: Self::Node, ancestor: Self::Node) -> Option<Affine>;

    /// The overlay layer painted above `root`, if the host provides one.
    fn overlay_layer(&mut self, root: Self::Node) -> Option<&mut Self::Layer>;
}

/// A host render list of overlays layered above regular content.
pub trait OverlayLayer {
    /// Add an overlay on top of the layer.
    fn add(&mut self, overlay: OverlayId);

    /// Remove an overlay. Returns `false` if it was not present.
    fn remove(&mut self, overlay: OverlayId) -> bool;

    /// Whether `overlay` is currently in the layer.
    fn contains(&self, overlay: OverlayId) -> bool;
}

/// A render surface overlays paint into.
pub trait Painter {
    /// Fill `path` (nonzero winding) with a solid color, without stroking it.
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    /// Stroke the outline of `rect`, without filling it.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Rgba8);
}
