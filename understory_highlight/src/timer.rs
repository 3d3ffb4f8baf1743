// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot, cancellable expiry timers keyed by overlay.
//!
//! A timer does not schedule anything by itself. The host polls it on the
//! scene graph's execution context (for example from its UI timer or frame
//! callback, armed for [`LifecycleTimer::deadline`]), and the timer reports its
//! overlay exactly once when the deadline has passed.

use core::time::Duration;

use crate::types::OverlayId;

/// State of a [`LifecycleTimer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Waiting for its deadline.
    Armed,
    /// Deadline reached and reported. Terminal.
    Fired,
    /// Stopped before the deadline. Terminal.
    Cancelled,
}

/// Expiry timer for one overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LifecycleTimer {
    overlay: OverlayId,
    deadline: Duration,
    state: TimerState,
}

impl LifecycleTimer {
    /// Arm a timer for `overlay` that expires `duration` after `now`.
    pub fn start(overlay: OverlayId, now: Duration, duration: Duration) -> Self {
        Self {
            overlay,
            deadline: now.saturating_add(duration),
            state: TimerState::Armed,
        }
    }

    /// The overlay this timer expires.
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }

    /// Instant at which the timer fires.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Whether the timer is still waiting.
    pub fn is_armed(&self) -> bool {
        self.state == TimerState::Armed
    }

    /// Time left until the deadline, or `None` once fired or cancelled.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.is_armed().then(|| self.deadline.saturating_sub(now))
    }

    /// Report the overlay if the deadline has passed.
    ///
    /// Returns `Some` on exactly one call; afterwards the timer is spent.
    pub fn poll(&mut self, now: Duration) -> Option<OverlayId> {
        if !self.is_armed() || now < self.deadline {
            return None;
        }
        self.state = TimerState::Fired;
        Some(self.overlay)
    }

    /// Stop the timer. Returns `false` if it had already fired or been cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.state = TimerState::Cancelled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: OverlayId = OverlayId::new(3, 1);

    #[test]
    fn fires_exactly_once_at_deadline() {
        let start = Duration::from_millis(1_000);
        let mut timer = LifecycleTimer::start(ID, start, Duration::from_secs(2));
        assert_eq!(timer.deadline(), Duration::from_millis(3_000));
        assert_eq!(timer.remaining(start), Some(Duration::from_secs(2)));

        assert_eq!(timer.poll(Duration::from_millis(2_999)), None);
        assert_eq!(timer.poll(Duration::from_millis(3_000)), Some(ID));
        assert_eq!(timer.poll(Duration::from_millis(3_001)), None);
        assert_eq!(timer.state(), TimerState::Fired);
        assert_eq!(timer.remaining(Duration::from_millis(3_001)), None);
        assert!(!timer.cancel(), "fired timers cannot be cancelled");
    }

    #[test]
    fn late_poll_still_fires_once() {
        let mut timer = LifecycleTimer::start(ID, Duration::ZERO, Duration::from_secs(2));
        assert_eq!(timer.poll(Duration::from_secs(60)), Some(ID));
        assert_eq!(timer.poll(Duration::from_secs(61)), None);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = LifecycleTimer::start(ID, Duration::ZERO, Duration::from_secs(2));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.poll(Duration::from_secs(5)), None);
        assert_eq!(timer.state(), TimerState::Cancelled);
    }
}
