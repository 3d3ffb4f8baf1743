// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_highlight --heading-base-level=0

//! Understory Highlight: transient, pulsing highlight overlays for UI controls.
//!
//! ## Overview
//!
//! Given a point in a root's local space, this crate finds the nearest interactive
//! control under it, dims everything except that control, and draws a red border
//! around it that grows and shrinks continuously. The overlay removes itself after
//! a fixed duration.
//!
//! The crate owns no scene graph and no clock. The host supplies both:
//! - A [`SceneGraph`]: hit testing, parent links, render sizes, transforms, and one
//!   [`OverlayLayer`] per root.
//! - A monotonic "now" as a [`Duration`](core::time::Duration), passed into every
//!   time-dependent call.
//! - A [`Painter`] to draw into; [`DisplayList`] records commands instead.
//!
//! ## Pipeline
//!
//! 1) [`resolve_target`]: hit test, then walk up to the first interactive node.
//! 2) [`project`] / [`frame_rect`]: target bounds and frame bounds in the root's space.
//! 3) [`build_mask`]: the frame minus the target, as a [`MaskRegion`].
//! 4) [`PulseAnimator`]: border rectangle as a function of time since attachment.
//! 5) [`HighlightOverlay`]: attach to the overlay layer, paint, detach.
//! 6) [`LifecycleTimer`]: single-shot expiry per overlay.
//!
//! [`Highlighter`] runs the whole pipeline per activation and owns the live overlays.
//! [`Highlighter::trigger`] is the entry point for input handlers: it swallows
//! "nothing to highlight" outcomes and only reports [fatal](HighlightError::is_fatal) errors.
//!
//! ## Execution context
//!
//! Every [`Highlighter`] call touches the host scene graph and must happen on its
//! owning context. An [`ExecutionContext`] checks this; with the `std` feature,
//! [`ThreadAffinity`] pins a highlighter to the thread that created it.
//!
//! ## Adapters
//!
//! - **Scene Adapter** (`scene_adapter` feature): implements the host contract for
//!   `understory_scene::Tree`. See [`adapters`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod adapters;

mod context;
mod display;
mod error;
mod geometry;
mod highlighter;
mod hit;
mod overlay;
mod pulse;
mod scene;
mod timer;
mod types;

#[cfg(feature = "std")]
pub use context::ThreadAffinity;
pub use context::{ExecutionContext, Unchecked};
pub use display::{DisplayItem, DisplayList};
pub use error::{DegenerateReason, HighlightError};
pub use geometry::{MaskRegion, build_mask, frame_rect, project};
pub use highlighter::Highlighter;
pub use hit::resolve_target;
pub use overlay::{HighlightOverlay, OverlayPhase};
pub use pulse::PulseAnimator;
pub use scene::{OverlayLayer, Painter, SceneGraph};
pub use timer::{LifecycleTimer, TimerState};
pub use types::{
    DEFAULT_BORDER_WIDTH, DEFAULT_DURATION, DEFAULT_GROWTH, DEFAULT_HALF_PERIOD, HighlightConfig,
    OverlayId, Rgba8,
};
