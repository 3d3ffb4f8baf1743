// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: overlay identifiers, colors, and tunables.

use core::time::Duration;

use crate::error::HighlightError;

/// Default time an overlay stays attached before it removes itself.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Default time for the border to grow from the target bounds to the enlarged bounds.
pub const DEFAULT_HALF_PERIOD: Duration = Duration::from_millis(500);

/// Default amount added to each dimension of the target bounds at the pulse peak.
pub const DEFAULT_GROWTH: f64 = 5.0;

/// Default border stroke width.
pub const DEFAULT_BORDER_WIDTH: f64 = 5.0;

/// Identifier for a highlight overlay (generational).
///
/// Slots are reused after an overlay is released; reuse bumps the generation so a
/// stale `OverlayId` never refers to a newer overlay.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(pub(crate) u32, pub(crate) u32);

impl OverlayId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An 8-bit-per-channel, non-premultiplied RGBA color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, `255` is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Half-transparent black, used to dim everything but the target.
    pub const DIM: Self = Self::new(0, 0, 0, 128);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Tunables for highlight overlays.
///
/// ```
/// use core::time::Duration;
/// use understory_highlight::HighlightConfig;
///
/// let config = HighlightConfig::default()
///     .with_duration(Duration::from_secs(3))
///     .with_half_period(Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// assert!(config.with_growth(-1.0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HighlightConfig {
    /// How long an overlay stays attached.
    pub duration: Duration,
    /// Duration of one grow (or shrink) leg of the border pulse.
    pub half_period: Duration,
    /// Amount added to each dimension of the target bounds at the pulse peak.
    pub growth: f64,
    /// Border stroke width.
    pub border_width: f64,
    /// Fill of the dimming mask.
    pub mask_fill: Rgba8,
    /// Border stroke color.
    pub border_color: Rgba8,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            half_period: DEFAULT_HALF_PERIOD,
            growth: DEFAULT_GROWTH,
            border_width: DEFAULT_BORDER_WIDTH,
            mask_fill: Rgba8::DIM,
            border_color: Rgba8::RED,
        }
    }
}

impl HighlightConfig {
    /// Set how long an overlay stays attached.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the duration of one leg of the border pulse.
    pub fn with_half_period(mut self, half_period: Duration) -> Self {
        self.half_period = half_period;
        self
    }

    /// Set the pulse growth.
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    /// Set the border stroke width and color.
    pub fn with_border(mut self, width: f64, color: Rgba8) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }

    /// Set the dimming mask fill.
    pub fn with_mask_fill(mut self, fill: Rgba8) -> Self {
        self.mask_fill = fill;
        self
    }

    /// Check that all tunables are usable.
    pub fn validate(&self) -> Result<(), HighlightError> {
        if self.duration.is_zero() {
            return Err(HighlightError::InvalidConfig("duration must be non-zero"));
        }
        if self.half_period.is_zero() {
            return Err(HighlightError::InvalidConfig("half period must be non-zero"));
        }
        if !(self.growth.is_finite() && self.growth > 0.0) {
            return Err(HighlightError::InvalidConfig(
                "growth must be finite and positive",
            ));
        }
        if !(self.border_width.is_finite() && self.border_width > 0.0) {
            return Err(HighlightError::InvalidConfig(
                "border width must be finite and positive",
            ));
        }
        Ok(())
    }
}
