// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pulsing border animation as a pure function of elapsed time.
//!
//! The border rectangle moves linearly from the target bounds to an enlarged copy
//! over one half period, then back over the next, forever (a triangle wave).
//! Elapsed time is measured from the moment the overlay was attached, so the
//! phase always starts at zero for a fresh overlay.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_highlight::PulseAnimator;
//!
//! let base = Rect::new(100.0, 100.0, 150.0, 120.0);
//! let pulse = PulseAnimator::new(base, 5.0, Duration::from_millis(500));
//!
//! assert_eq!(pulse.current_rect(Duration::ZERO), base);
//! assert_eq!(pulse.current_rect(Duration::from_millis(500)), pulse.enlarged_rect());
//! assert_eq!(pulse.current_rect(Duration::from_millis(1000)), base);
//! ```

use core::time::Duration;

use kurbo::Rect;

/// Triangle-wave interpolation between a base rectangle and an enlarged copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PulseAnimator {
    base: Rect,
    enlarged: Rect,
    half_period: Duration,
}

impl PulseAnimator {
    /// Create an animator around `base`.
    ///
    /// The enlarged rectangle shares `base`'s center and is `growth` larger in each
    /// dimension. A zero `half_period` disables the animation: the border stays at `base`.
    pub fn new(base: Rect, growth: f64, half_period: Duration) -> Self {
        let base = base.abs();
        Self {
            base,
            enlarged: base.inflate(growth / 2.0, growth / 2.0),
            half_period,
        }
    }

    /// The rectangle at phase zero.
    pub fn base_rect(&self) -> Rect {
        self.base
    }

    /// The rectangle at the peak of the pulse.
    pub fn enlarged_rect(&self) -> Rect {
        self.enlarged
    }

    /// Duration of one grow or shrink leg.
    pub fn half_period(&self) -> Duration {
        self.half_period
    }

    /// Position in the cycle: `0.0` at the base rectangle, `1.0` at the enlarged one.
    ///
    /// Computed from whole nanoseconds so the cycle closes exactly at every even
    /// multiple of the half period.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let half = self.half_period.as_nanos();
        if half == 0 {
            return 0.0;
        }
        let t = elapsed.as_nanos() % (2 * half);
        let leg = if t <= half { t } else { 2 * half - t };
        leg as f64 / half as f64
    }

    /// Border rectangle after `elapsed` time since attachment.
    pub fn current_rect(&self, elapsed: Duration) -> Rect {
        let t = self.progress(elapsed);
        let (a, b) = (self.base, self.enlarged);
        Rect::new(
            lerp(a.x0, b.x0, t),
            lerp(a.y0, b.y0, t),
            lerp(a.x1, b.x1, t),
            lerp(a.y1, b.y1, t),
        )
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
