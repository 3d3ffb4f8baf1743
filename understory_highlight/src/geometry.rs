// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay geometry: projecting a target into the overlay's frame and building the dimming mask.

use kurbo::{BezPath, Point, Rect, Size};
use smallvec::SmallVec;

use crate::error::{DegenerateReason, HighlightError};
use crate::scene::SceneGraph;

/// Bounds of `target` expressed in `frame`'s local space.
///
/// The target's local bounds run from `(0, 0)` to its current render size. They are
/// mapped through the target→frame transform and the axis-aligned bounding box of
/// the result is returned. Nothing is cached: each call reads the current layout.
pub fn project<S: SceneGraph>(
    scene: &S,
    target: S::Node,
    frame: S::Node,
) -> Result<Rect, HighlightError> {
    let size = scene
        .render_size(target)
        .filter(|s| has_area(*s))
        .ok_or(HighlightError::DegenerateGeometry(DegenerateReason::EmptyTarget))?;
    let transform = scene
        .transform_to_ancestor(target, frame)
        .ok_or(HighlightError::DegenerateGeometry(DegenerateReason::NotDescendant))?;
    Ok(transform.transform_rect_bbox(Rect::from_origin_size(Point::ORIGIN, size)))
}

/// The full render rectangle of `frame`: origin `(0, 0)`, current render size.
pub fn frame_rect<S: SceneGraph>(scene: &S, frame: S::Node) -> Result<Rect, HighlightError> {
    scene
        .render_size(frame)
        .filter(|s| has_area(*s))
        .map(|size| Rect::from_origin_size(Point::ORIGIN, size))
        .ok_or(HighlightError::DegenerateGeometry(DegenerateReason::EmptyFrame))
}

fn has_area(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}

/// A fillable region: a rectangle with a rectangular hole punched out of it.
///
/// Built with [`build_mask`]. The hole is always clipped to the outer rectangle,
/// so it may be smaller than the cutout requested, or absent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaskRegion {
    outer: Rect,
    hole: Option<Rect>,
}

/// Build the region `full` minus `cutout`.
///
/// Both rectangles are normalized first. A cutout that spills past `full` only
/// removes the overlapping part; one that misses `full` entirely removes nothing.
///
/// ```
/// use kurbo::Rect;
/// use understory_highlight::build_mask;
///
/// let full = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let mask = build_mask(full, Rect::new(100.0, 100.0, 150.0, 120.0));
/// assert_eq!(mask.area(), 800.0 * 600.0 - 50.0 * 20.0);
/// assert!(build_mask(full, full).is_empty());
/// ```
pub fn build_mask(full: Rect, cutout: Rect) -> MaskRegion {
    let outer = full.abs();
    let overlap = outer.intersect(cutout.abs());
    let hole = (overlap.width() > 0.0 && overlap.height() > 0.0).then_some(overlap);
    MaskRegion { outer, hole }
}

impl MaskRegion {
    /// The rectangle the hole is punched out of.
    pub fn outer(&self) -> Rect {
        self.outer
    }

    /// The hole, clipped to [`outer`](Self::outer), if it has any area.
    pub fn hole(&self) -> Option<Rect> {
        self.hole
    }

    /// Paintable area.
    pub fn area(&self) -> f64 {
        self.outer.area() - self.hole.map_or(0.0, |h| h.area())
    }

    /// Whether the region has no paintable area.
    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Whether `point` lies in the region (half-open on the right and bottom edges).
    pub fn contains(&self, point: Point) -> bool {
        self.outer.contains(point) && !self.hole.is_some_and(|h| h.contains(point))
    }

    /// Disjoint rectangles covering the region exactly.
    ///
    /// Full-width bands above and below the hole, then the strips to its left and
    /// right. Empty pieces are omitted, so there are at most four.
    pub fn bands(&self) -> SmallVec<[Rect; 4]> {
        let o = self.outer;
        let mut out = SmallVec::new();
        let Some(h) = self.hole else {
            if o.area() > 0.0 {
                out.push(o);
            }
            return out;
        };
        let candidates = [
            Rect::new(o.x0, o.y0, o.x1, h.y0),
            Rect::new(o.x0, h.y1, o.x1, o.y1),
            Rect::new(o.x0, h.y0, h.x0, h.y1),
            Rect::new(h.x1, h.y0, o.x1, h.y1),
        ];
        out.extend(
            candidates
                .into_iter()
                .filter(|r| r.width() > 0.0 && r.height() > 0.0),
        );
        out
    }

    /// Outline of the region as a path.
    ///
    /// The outer contour runs clockwise (in y-down space) and the hole runs the
    /// other way, so the result fills correctly under both nonzero and even-odd rules.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let o = self.outer;
        path.move_to((o.x0, o.y0));
        path.line_to((o.x1, o.y0));
        path.line_to((o.x1, o.y1));
        path.line_to((o.x0, o.y1));
        path.close_path();
        if let Some(h) = self.hole {
            path.move_to((h.x0, h.y0));
            path.line_to((h.x0, h.y1));
            path.line_to((h.x1, h.y1));
            path.line_to((h.x1, h.y0));
            path.close_path();
        }
        path
    }
}
