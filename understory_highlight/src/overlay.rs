// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The highlight overlay: a dimming mask with a cutout and a pulsing border.
//!
//! ## Lifecycle
//!
//! `Created → Attached → Detached`. Detached is terminal; a new highlight always
//! builds a new overlay. [`HighlightOverlay::detach`] is idempotent and is the only
//! way to stop an overlay; once detached it never paints again.

use core::time::Duration;

use kurbo::{BezPath, Rect, Stroke};

use crate::error::HighlightError;
use crate::geometry::MaskRegion;
use crate::pulse::PulseAnimator;
use crate::scene::{OverlayLayer, Painter};
use crate::types::{HighlightConfig, OverlayId, Rgba8};

/// Lifecycle phase of a [`HighlightOverlay`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlayPhase {
    /// Built but not yet in a layer.
    Created,
    /// In a layer and painting.
    Attached,
    /// Removed from its layer for good.
    Detached,
}

/// A renderable highlight: mask, border animation, and the root it is layered over.
///
/// The overlay holds only what it needs to paint plus the handle of the root whose
/// overlay layer it sits in. It never owns scene nodes.
#[derive(Clone, Debug)]
pub struct HighlightOverlay<N> {
    id: OverlayId,
    host: N,
    mask: MaskRegion,
    mask_path: BezPath,
    mask_fill: Rgba8,
    pulse: PulseAnimator,
    border: Stroke,
    border_color: Rgba8,
    phase: OverlayPhase,
    attached_at: Duration,
}

impl<N: Copy> HighlightOverlay<N> {
    /// Build an overlay for the root `host` with the given mask and border animation.
    pub fn new(
        id: OverlayId,
        host: N,
        mask: MaskRegion,
        pulse: PulseAnimator,
        config: &HighlightConfig,
    ) -> Self {
        Self {
            id,
            host,
            mask,
            mask_path: mask.to_path(),
            mask_fill: config.mask_fill,
            pulse,
            border: Stroke::new(config.border_width),
            border_color: config.border_color,
            phase: OverlayPhase::Created,
            attached_at: Duration::ZERO,
        }
    }

    /// This overlay's identifier.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The root whose overlay layer this overlay is (or was) in.
    pub fn host(&self) -> N {
        self.host
    }

    /// The dimming mask.
    pub fn mask(&self) -> &MaskRegion {
        &self.mask
    }

    /// The border animation.
    pub fn pulse(&self) -> &PulseAnimator {
        &self.pulse
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether the overlay is in a layer and painting.
    pub fn is_attached(&self) -> bool {
        self.phase == OverlayPhase::Attached
    }

    /// Insert into `layer` and start the pulse clock at `now`.
    ///
    /// Only a freshly created overlay can be attached.
    pub fn attach<L: OverlayLayer + ?Sized>(
        &mut self,
        layer: &mut L,
        now: Duration,
    ) -> Result<(), HighlightError> {
        if self.phase != OverlayPhase::Created {
            return Err(HighlightError::InvalidTransition {
                from: self.phase,
                to: OverlayPhase::Attached,
            });
        }
        layer.add(self.id);
        self.phase = OverlayPhase::Attached;
        self.attached_at = now;
        tracing::debug!(overlay = ?self.id, border = ?self.pulse.base_rect(), "overlay attached");
        Ok(())
    }

    /// Remove from the layer and stop painting.
    ///
    /// `layer` is the host's current overlay layer for [`host`](Self::host), or `None`
    /// if it no longer exists (the overlay is still marked detached).
    /// Returns `true` if this call detached the overlay; calling it again, or on an
    /// overlay that was never attached, does nothing and returns `false`.
    pub fn detach<L: OverlayLayer + ?Sized>(&mut self, layer: Option<&mut L>) -> bool {
        if self.phase != OverlayPhase::Attached {
            return false;
        }
        match layer {
            Some(layer) => {
                if !layer.remove(self.id) {
                    tracing::warn!(overlay = ?self.id, "overlay was already gone from its layer");
                }
            }
            None => tracing::warn!(overlay = ?self.id, "overlay layer vanished before detach"),
        }
        self.phase = OverlayPhase::Detached;
        tracing::debug!(overlay = ?self.id, "overlay detached");
        true
    }

    /// Time since attachment, or `None` if not attached.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        self.is_attached()
            .then(|| now.saturating_sub(self.attached_at))
    }

    /// Border rectangle at `now`, or `None` if not attached.
    pub fn border_rect(&self, now: Duration) -> Option<Rect> {
        self.elapsed(now).map(|e| self.pulse.current_rect(e))
    }

    /// Paint the mask (fill only), then the border (stroke only).
    ///
    /// Does nothing unless attached.
    pub fn render<P: Painter + ?Sized>(&self, now: Duration, painter: &mut P) {
        let Some(border) = self.border_rect(now) else {
            return;
        };
        painter.fill_path(&self.mask_path, self.mask_fill);
        painter.stroke_rect(border, &self.border, self.border_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayItem, DisplayList};
    use crate::geometry::build_mask;
    use crate::hit::tests::TestLayer;

    fn overlay() -> HighlightOverlay<usize> {
        let config = HighlightConfig::default();
        let target = Rect::new(100.0, 100.0, 150.0, 120.0);
        HighlightOverlay::new(
            OverlayId::new(0, 1),
            0,
            build_mask(Rect::new(0.0, 0.0, 800.0, 600.0), target),
            PulseAnimator::new(target, config.growth, config.half_period),
            &config,
        )
    }

    #[test]
    fn attach_adds_to_layer_and_starts_clock() {
        let mut layer = TestLayer::default();
        let mut o = overlay();
        assert_eq!(o.phase(), OverlayPhase::Created);
        assert_eq!(o.border_rect(Duration::ZERO), None);

        let t0 = Duration::from_secs(10);
        o.attach(&mut layer, t0).unwrap();
        assert!(layer.contains(o.id()));
        assert_eq!(o.elapsed(t0 + Duration::from_millis(40)), Some(Duration::from_millis(40)));
        assert_eq!(o.border_rect(t0), Some(o.pulse().base_rect()));
        assert_eq!(
            o.border_rect(t0 + Duration::from_millis(500)),
            Some(o.pulse().enlarged_rect())
        );
    }

    #[test]
    fn detach_is_idempotent() {
        let mut layer = TestLayer::default();
        let mut o = overlay();
        o.attach(&mut layer, Duration::ZERO).unwrap();

        assert!(o.detach(Some(&mut layer)));
        let after_once = (o.phase(), layer.0.clone());
        assert!(!o.detach(Some(&mut layer)));
        assert_eq!((o.phase(), layer.0.clone()), after_once);
        assert_eq!(o.phase(), OverlayPhase::Detached);
        assert!(layer.0.is_empty());
    }

    #[test]
    fn detached_overlay_cannot_reattach() {
        let mut layer = TestLayer::default();
        let mut o = overlay();
        o.attach(&mut layer, Duration::ZERO).unwrap();
        assert!(o.detach(None::<&mut TestLayer>));
        assert_eq!(
            o.attach(&mut layer, Duration::ZERO),
            Err(HighlightError::InvalidTransition {
                from: OverlayPhase::Detached,
                to: OverlayPhase::Attached,
            })
        );
    }

    #[test]
    fn detaching_a_created_overlay_is_a_no_op() {
        let mut layer = TestLayer::default();
        let mut o = overlay();
        assert!(!o.detach(Some(&mut layer)));
        assert_eq!(o.phase(), OverlayPhase::Created);
    }

    #[test]
    fn render_paints_mask_then_border() {
        let mut layer = TestLayer::default();
        let mut o = overlay();
        let mut list = DisplayList::new();
        o.render(Duration::ZERO, &mut list);
        assert!(list.is_empty(), "created overlays do not paint");

        o.attach(&mut layer, Duration::ZERO).unwrap();
        o.render(Duration::from_millis(250), &mut list);
        match list.items() {
            [
                DisplayItem::Fill { path, color },
                DisplayItem::Stroke { rect, width, color: border },
            ] => {
                assert_eq!(*path, o.mask().to_path());
                assert_eq!(*color, Rgba8::DIM);
                assert_eq!(*rect, Rect::new(98.75, 98.75, 151.25, 121.25));
                assert_eq!(*width, 5.0);
                assert_eq!(*border, Rgba8::RED);
            }
            other => panic!("unexpected display list {other:?}"),
        }

        list.clear();
        o.detach(Some(&mut layer));
        o.render(Duration::from_millis(300), &mut list);
        assert!(list.is_empty(), "detached overlays do not paint");
    }
}
