//! Millisecond countdown used for hit invulnerability and toy abilities.

/// Countdown that deactivates itself once it runs out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timer {
    active: bool,
    countdown: f32,
    duration: f32,
}

impl Timer {
    /// Creates an inactive timer that counts down from `duration` once started.
    #[must_use]
    pub const fn new(duration: f32) -> Self {
        Self {
            active: false,
            countdown: duration,
            duration,
        }
    }

    /// Reports whether the timer is counting down.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Milliseconds left before the timer expires.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.countdown
    }

    /// Starts counting down from the configured duration.
    pub fn start(&mut self) {
        self.active = true;
        self.countdown = self.duration;
    }

    /// Advances the countdown, returning `true` on the tick it expires.
    pub fn decrement(&mut self, ms: f32) -> bool {
        if !self.active {
            return false;
        }

        self.countdown -= ms;
        if self.countdown <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Stops the countdown without reporting expiry.
    pub fn reset(&mut self) {
        self.active = false;
        self.countdown = 0.0;
    }
}
