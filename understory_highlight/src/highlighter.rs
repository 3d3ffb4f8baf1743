// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation boundary: turns a point into an attached, self-expiring overlay.
//!
//! ## Flow
//!
//! [`Highlighter::activate`] resolves the interactive element under the point,
//! projects its bounds into the root's frame, builds the dimming mask and the
//! border pulse, attaches a new [`HighlightOverlay`] to the root's overlay layer,
//! and arms a [`LifecycleTimer`] for it. Every activation creates an independent
//! overlay with its own timer and its own pulse phase.
//!
//! The host then drives three calls from the scene graph's execution context:
//! - [`Highlighter::render`] once per frame, with the frame time.
//! - [`Highlighter::tick`] whenever its UI timer fires (see [`Highlighter::next_deadline`]).
//! - [`Highlighter::dispose`] to cancel an overlay early.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;

use crate::context::{ExecutionContext, Unchecked};
use crate::error::HighlightError;
use crate::geometry::{build_mask, frame_rect, project};
use crate::hit::resolve_target;
use crate::overlay::HighlightOverlay;
use crate::pulse::PulseAnimator;
use crate::scene::{Painter, SceneGraph};
use crate::timer::LifecycleTimer;
use crate::types::{HighlightConfig, OverlayId};

/// Owns the live overlays of one scene graph and their expiry timers.
///
/// `S` is the host scene graph. `C` checks that calls arrive on the scene graph's
/// execution context; it defaults to [`Unchecked`].
pub struct Highlighter<S: SceneGraph, C: ExecutionContext = Unchecked> {
    config: HighlightConfig,
    is_interactive: fn(&S, S::Node) -> bool,
    context: C,
    /// slots
    slots: Vec<Option<Slot<S::Node>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    next_seq: u64,
}

#[derive(Debug)]
struct Slot<N> {
    overlay: HighlightOverlay<N>,
    timer: LifecycleTimer,
    /// Activation order, used as paint order.
    seq: u64,
}

impl<S: SceneGraph, C: ExecutionContext + core::fmt::Debug> core::fmt::Debug for Highlighter<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Highlighter")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("active", &self.active_count())
            .finish_non_exhaustive()
    }
}

impl<S: SceneGraph> Highlighter<S, Unchecked> {
    /// Create a highlighter with default tunables and no context checks.
    ///
    /// `is_interactive` decides which nodes count as controls worth highlighting.
    pub fn new(is_interactive: fn(&S, S::Node) -> bool) -> Self {
        Self::with_context(is_interactive, Unchecked)
    }
}

impl<S: SceneGraph, C: ExecutionContext> Highlighter<S, C> {
    /// Create a highlighter with default tunables that checks `context` on every call.
    pub fn with_context(is_interactive: fn(&S, S::Node) -> bool, context: C) -> Self {
        Self {
            config: HighlightConfig::default(),
            is_interactive,
            context,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            next_seq: 0,
        }
    }

    /// Replace the tunables used by future activations.
    ///
    /// Overlays that are already live keep the settings they were built with.
    pub fn with_config(mut self, config: HighlightConfig) -> Result<Self, HighlightError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Tunables used by future activations.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlight the interactive element under `point` (in `root`'s local space).
    ///
    /// On success the new overlay is already in `root`'s overlay layer and will
    /// remove itself once [`tick`](Self::tick) observes `now + duration`.
    /// Nothing is attached when an error is returned.
    pub fn activate(
        &mut self,
        scene: &mut S,
        root: S::Node,
        point: Point,
        now: Duration,
    ) -> Result<OverlayId, HighlightError> {
        self.ensure_context()?;
        let target = resolve_target(scene, root, point, self.is_interactive)
            .ok_or(HighlightError::NoTargetFound)?;
        let target_rect = project(scene, target, root)?;
        let mask = build_mask(frame_rect(scene, root)?, target_rect);
        let pulse = PulseAnimator::new(target_rect, self.config.growth, self.config.half_period);

        let layer = scene
            .overlay_layer(root)
            .ok_or(HighlightError::NoOverlayLayer)?;
        let id = self.next_id();
        let mut overlay = HighlightOverlay::new(id, root, mask, pulse, &self.config);
        overlay.attach(layer, now)?;
        let timer = LifecycleTimer::start(id, now, self.config.duration);
        tracing::debug!(
            overlay = ?id,
            ?target,
            ?target_rect,
            deadline = ?timer.deadline(),
            "highlight activated"
        );

        let seq = self.next_seq;
        self.next_seq += 1;
        self.store(Slot {
            overlay,
            timer,
            seq,
        });
        Ok(id)
    }

    /// Like [`activate`](Self::activate), but treats "nothing to highlight" as success.
    ///
    /// Returns `Ok(None)` for non-fatal failures and only surfaces
    /// [fatal](HighlightError::is_fatal) errors.
    pub fn trigger(
        &mut self,
        scene: &mut S,
        root: S::Node,
        point: Point,
        now: Duration,
    ) -> Result<Option<OverlayId>, HighlightError> {
        match self.activate(scene, root, point, now) {
            Ok(id) => Ok(Some(id)),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::debug!(%err, ?point, "highlight skipped");
                Ok(None)
            }
        }
    }

    /// Fire every timer whose deadline is at or before `now`.
    ///
    /// Each expired overlay is detached from its layer and released. Returns how
    /// many overlays expired.
    pub fn tick(&mut self, scene: &mut S, now: Duration) -> Result<usize, HighlightError> {
        self.ensure_context()?;
        let mut expired = 0;
        for idx in 0..self.slots.len() {
            let Some(slot) = self.slots[idx].as_mut() else {
                continue;
            };
            let Some(id) = slot.timer.poll(now) else {
                continue;
            };
            let host = slot.overlay.host();
            slot.overlay.detach(scene.overlay_layer(host));
            tracing::debug!(overlay = ?id, ?now, "highlight expired");
            self.release(idx);
            expired += 1;
        }
        Ok(expired)
    }

    /// Cancel an overlay before it expires: stop its timer, detach it, and release it.
    ///
    /// Returns `Ok(false)` if `id` is not live (already expired or disposed).
    pub fn dispose(&mut self, scene: &mut S, id: OverlayId) -> Result<bool, HighlightError> {
        self.ensure_context()?;
        let Some(slot) = self.slot_mut(id) else {
            return Ok(false);
        };
        slot.timer.cancel();
        let host = slot.overlay.host();
        slot.overlay.detach(scene.overlay_layer(host));
        tracing::debug!(overlay = ?id, "highlight disposed");
        self.release(id.idx());
        Ok(true)
    }

    /// Dispose every live overlay. Returns how many were disposed.
    pub fn dispose_all(&mut self, scene: &mut S) -> Result<usize, HighlightError> {
        self.ensure_context()?;
        let ids: Vec<OverlayId> = self.overlays().map(HighlightOverlay::id).collect();
        let mut disposed = 0;
        for id in ids {
            if self.dispose(scene, id)? {
                disposed += 1;
            }
        }
        Ok(disposed)
    }

    /// Paint all live overlays at frame time `now`, oldest activation first.
    pub fn render<P: Painter + ?Sized>(
        &self,
        now: Duration,
        painter: &mut P,
    ) -> Result<(), HighlightError> {
        self.ensure_context()?;
        for overlay in self.overlays() {
            overlay.render(now, painter);
        }
        Ok(())
    }

    /// Earliest pending expiry, for arming the host's UI timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.live_slots()
            .filter(|s| s.timer.is_armed())
            .map(|s| s.timer.deadline())
            .min()
    }

    /// Number of live overlays.
    pub fn active_count(&self) -> usize {
        self.live_slots().count()
    }

    /// Whether `id` refers to a live overlay.
    pub fn is_active(&self, id: OverlayId) -> bool {
        self.slot(id).is_some()
    }

    /// A live overlay.
    pub fn overlay(&self, id: OverlayId) -> Option<&HighlightOverlay<S::Node>> {
        self.slot(id).map(|s| &s.overlay)
    }

    /// The expiry timer of a live overlay.
    pub fn timer(&self, id: OverlayId) -> Option<&LifecycleTimer> {
        self.slot(id).map(|s| &s.timer)
    }

    /// Live overlays in activation order.
    pub fn overlays(&self) -> impl Iterator<Item = &HighlightOverlay<S::Node>> + '_ {
        let mut live: Vec<&Slot<S::Node>> = self.live_slots().collect();
        live.sort_by_key(|s| s.seq);
        live.into_iter().map(|s| &s.overlay)
    }

    // --- internals ---

    fn ensure_context(&self) -> Result<(), HighlightError> {
        if self.context.is_current() {
            Ok(())
        } else {
            tracing::error!("highlighter used off its execution context");
            Err(HighlightError::WrongExecutionContext)
        }
    }

    fn live_slots(&self) -> impl Iterator<Item = &Slot<S::Node>> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn slot(&self, id: OverlayId) -> Option<&Slot<S::Node>> {
        let s = self.slots.get(id.idx())?.as_ref()?;
        (s.overlay.id() == id).then_some(s)
    }

    fn slot_mut(&mut self, id: OverlayId) -> Option<&mut Slot<S::Node>> {
        let s = self.slots.get_mut(id.idx())?.as_mut()?;
        if s.overlay.id() != id {
            return None;
        }
        Some(s)
    }

    /// The id the next stored overlay will get.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "OverlayId uses 32-bit indices."
    )]
    fn next_id(&self) -> OverlayId {
        match self.free_list.last() {
            Some(&idx) => OverlayId::new(idx as u32, self.generations[idx] + 1),
            None => OverlayId::new(self.slots.len() as u32, 1),
        }
    }

    /// Store a slot under the id handed out by [`Self::next_id`].
    fn store(&mut self, slot: Slot<S::Node>) {
        let id = slot.overlay.id();
        if self.free_list.last() == Some(&id.idx()) {
            self.free_list.pop();
            self.generations[id.idx()] = id.1;
            self.slots[id.idx()] = Some(slot);
        } else {
            debug_assert_eq!(id.idx(), self.slots.len(), "id must come from next_id");
            self.slots.push(Some(slot));
            self.generations.push(id.1);
        }
    }

    /// Free a slot. A slot whose generation is exhausted is retired, not reused.
    fn release(&mut self, idx: usize) {
        if self.slots[idx].take().is_some() && self.generations[idx] < u32::MAX {
            self.free_list.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayItem, DisplayList};
    use crate::hit::tests::FlatScene;
    use crate::overlay::OverlayPhase;
    use crate::scene::OverlayLayer;
    use kurbo::Rect;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn scene() -> FlatScene {
        let mut scene = FlatScene::default();
        let root = scene.push(None, Rect::new(0.0, 0.0, 800.0, 600.0), false);
        let ok = scene.push(Some(root), Rect::new(100.0, 100.0, 150.0, 120.0), true);
        let _cancel = scene.push(Some(root), Rect::new(200.0, 100.0, 250.0, 120.0), true);
        let _label = scene.push(Some(ok), Rect::new(105.0, 102.0, 140.0, 118.0), false);
        scene
    }

    fn highlighter() -> Highlighter<FlatScene> {
        Highlighter::new(FlatScene::is_control)
    }

    #[test]
    fn activation_attaches_and_expires_after_duration() {
        let mut scene = scene();
        let mut hl = highlighter();
        let id = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(1_000))
            .unwrap();
        assert!(scene.layer.contains(id));
        let overlay = hl.overlay(id).unwrap();
        assert_eq!(overlay.pulse().base_rect(), Rect::new(100.0, 100.0, 150.0, 120.0));
        assert_eq!(overlay.mask().area(), 480_000.0 - 1_000.0);
        assert_eq!(hl.next_deadline(), Some(ms(3_000)));

        assert_eq!(hl.tick(&mut scene, ms(2_999)).unwrap(), 0);
        assert!(hl.is_active(id));
        assert_eq!(hl.tick(&mut scene, ms(3_000)).unwrap(), 1);
        assert!(!hl.is_active(id));
        assert!(!scene.layer.contains(id));
        assert_eq!(hl.next_deadline(), None);
        assert_eq!(hl.tick(&mut scene, ms(9_000)).unwrap(), 0, "fires once");
    }

    #[test]
    fn non_fatal_failures_are_swallowed_by_trigger() {
        let mut scene = scene();
        let mut hl = highlighter();
        assert_eq!(
            hl.activate(&mut scene, 0, Point::new(5.0, 5.0), ms(0)),
            Err(HighlightError::NoTargetFound)
        );
        assert_eq!(hl.trigger(&mut scene, 0, Point::new(5.0, 5.0), ms(0)), Ok(None));
        assert_eq!(hl.active_count(), 0);
        assert!(scene.layer.0.is_empty());
    }

    #[test]
    fn degenerate_frame_aborts_before_attach() {
        let mut scene = scene();
        scene.rects[0] = Rect::new(0.0, 0.0, 800.0, 0.0);
        let mut hl = highlighter();
        assert_eq!(
            hl.activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0)),
            Err(HighlightError::DegenerateGeometry(
                crate::error::DegenerateReason::EmptyFrame
            ))
        );
        assert_eq!(hl.trigger(&mut scene, 0, Point::new(110.0, 105.0), ms(0)), Ok(None));
        assert!(scene.layer.0.is_empty());
        assert_eq!(hl.active_count(), 0);
        assert_eq!(hl.next_deadline(), None);
    }

    #[test]
    fn independent_activations() {
        let mut scene = scene();
        let mut hl = highlighter();
        let a = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        let b = hl
            .activate(&mut scene, 0, Point::new(210.0, 105.0), ms(300))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.layer.0, [a, b]);

        let (oa, ob) = (hl.overlay(a).unwrap(), hl.overlay(b).unwrap());
        assert_eq!(oa.border_rect(ms(300)), Some(oa.pulse().current_rect(ms(300))));
        assert_eq!(ob.border_rect(ms(300)), Some(ob.pulse().base_rect()), "own phase");

        assert_eq!(hl.tick(&mut scene, ms(2_000)).unwrap(), 1);
        assert!(!hl.is_active(a));
        assert!(hl.is_active(b));
        assert_eq!(hl.tick(&mut scene, ms(2_300)).unwrap(), 1);
        assert_eq!(hl.active_count(), 0);
    }

    #[test]
    fn dispose_cancels_timer_and_is_idempotent() {
        let mut scene = scene();
        let mut hl = highlighter();
        let id = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        assert_eq!(hl.dispose(&mut scene, id), Ok(true));
        assert_eq!(hl.dispose(&mut scene, id), Ok(false));
        assert!(scene.layer.0.is_empty());
        assert_eq!(hl.tick(&mut scene, ms(5_000)).unwrap(), 0);
    }

    #[test]
    fn released_ids_stay_stale_after_reuse() {
        let mut scene = scene();
        let mut hl = highlighter();
        let first = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        hl.dispose(&mut scene, first).unwrap();
        let second = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(10))
            .unwrap();
        assert_eq!(first.idx(), second.idx(), "slot is reused");
        assert_ne!(first, second);
        assert!(!hl.is_active(first));
        assert_eq!(hl.dispose(&mut scene, first), Ok(false));
        assert!(hl.is_active(second));
    }

    #[test]
    fn exhausted_slots_are_retired() {
        let mut scene = scene();
        let mut hl = highlighter();
        let first = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        hl.dispose(&mut scene, first).unwrap();
        hl.generations[first.idx()] = u32::MAX - 1;

        let last = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        assert_eq!(last, OverlayId::new(0, u32::MAX));
        hl.dispose(&mut scene, last).unwrap();

        let next = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        assert_eq!(next.idx(), 1, "exhausted slot is never handed out again");
        assert!(!hl.is_active(last));
        assert!(hl.is_active(next));
    }

    #[test]
    fn render_paints_in_activation_order() {
        let mut scene = scene();
        let mut hl = highlighter();
        let a = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        let _b = hl
            .activate(&mut scene, 0, Point::new(210.0, 105.0), ms(0))
            .unwrap();
        // Free slot 0 and reuse it so slot order differs from activation order.
        hl.dispose(&mut scene, a).unwrap();
        let _c = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();

        let mut list = DisplayList::new();
        hl.render(ms(0), &mut list).unwrap();
        let borders: Vec<Rect> = list
            .items()
            .iter()
            .filter_map(|item| match item {
                DisplayItem::Stroke { rect, .. } => Some(*rect),
                DisplayItem::Fill { .. } => None,
            })
            .collect();
        assert_eq!(
            borders,
            [
                Rect::new(200.0, 100.0, 250.0, 120.0),
                Rect::new(100.0, 100.0, 150.0, 120.0),
            ]
        );
    }

    #[test]
    fn custom_config_controls_duration_and_pulse() {
        let mut scene = scene();
        let config = HighlightConfig::default()
            .with_duration(ms(100))
            .with_half_period(ms(10));
        let mut hl = highlighter().with_config(config).unwrap();
        let id = hl
            .activate(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap();
        let overlay = hl.overlay(id).unwrap();
        assert_eq!(overlay.border_rect(ms(10)), Some(overlay.pulse().enlarged_rect()));
        assert_eq!(overlay.phase(), OverlayPhase::Attached);
        assert_eq!(hl.tick(&mut scene, ms(100)).unwrap(), 1);

        assert!(matches!(
            highlighter().with_config(config.with_duration(ms(0))),
            Err(HighlightError::InvalidConfig(_))
        ));
    }

    #[derive(Debug)]
    struct Elsewhere;

    impl ExecutionContext for Elsewhere {
        fn is_current(&self) -> bool {
            false
        }
    }

    #[test]
    fn wrong_context_is_fatal() {
        let mut scene = scene();
        let mut hl: Highlighter<FlatScene, Elsewhere> =
            Highlighter::with_context(FlatScene::is_control, Elsewhere);
        let err = hl
            .trigger(&mut scene, 0, Point::new(110.0, 105.0), ms(0))
            .unwrap_err();
        assert_eq!(err, HighlightError::WrongExecutionContext);
        assert!(err.is_fatal());
        assert!(scene.layer.0.is_empty());
        assert_eq!(hl.tick(&mut scene, ms(0)), Err(HighlightError::WrongExecutionContext));
        assert_eq!(
            hl.dispose_all(&mut scene),
            Err(HighlightError::WrongExecutionContext),
            "checked even with nothing to dispose"
        );
        let mut list = DisplayList::new();
        assert_eq!(
            hl.render(ms(0), &mut list),
            Err(HighlightError::WrongExecutionContext)
        );
    }
}
