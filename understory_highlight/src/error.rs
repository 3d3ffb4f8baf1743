// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for highlight activation and overlay lifecycle.

use thiserror::Error;

use crate::overlay::OverlayPhase;

/// Why a target's geometry could not be projected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DegenerateReason {
    /// The target has no render size, or a zero width or height.
    EmptyTarget,
    /// The reference frame has no render size, or a zero width or height.
    EmptyFrame,
    /// The target is not the reference frame or one of its descendants.
    NotDescendant,
}

/// Errors produced while activating or managing highlight overlays.
///
/// Only [`WrongExecutionContext`](Self::WrongExecutionContext) and
/// [`InvalidConfig`](Self::InvalidConfig) are [fatal](Self::is_fatal);
/// everything else means "nothing to highlight" and is swallowed by
/// [`Highlighter::trigger`](crate::Highlighter::trigger).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// Nothing was hit, or nothing on the hit path is an interactive control.
    #[error("no interactive element under the point")]
    NoTargetFound,
    /// The target's bounds cannot be projected into the overlay's frame.
    #[error("degenerate target geometry: {0:?}")]
    DegenerateGeometry(DegenerateReason),
    /// The host provided no overlay layer for the root.
    #[error("no overlay layer for the scene root")]
    NoOverlayLayer,
    /// A scene-graph operation was invoked off the owning execution context.
    #[error("called off the scene graph's execution context")]
    WrongExecutionContext,
    /// An overlay was asked to make a transition its state machine forbids.
    #[error("overlay cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        /// Phase the overlay was in.
        from: OverlayPhase,
        /// Phase that was requested.
        to: OverlayPhase,
    },
    /// A tunable is out of range.
    #[error("invalid highlight configuration: {0}")]
    InvalidConfig(&'static str),
}

impl HighlightError {
    /// Whether this error indicates a programming error rather than "nothing to show".
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WrongExecutionContext | Self::InvalidConfig(_))
    }
}
