//! One-shot countdown used for every cancellable timer in the engine.
//!
//! Navigation fallbacks, caption hides and highlights all own a
//! [`Countdown`] and drop it to cancel. Nothing here fires callbacks; the
//! owning system polls [`Countdown::tick`] once per frame and acts on the
//! returned flag.

/// Counts a number of seconds and then reports completion once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Countdown {
    pub duration: f32,
    pub elapsed: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Countdown {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns true when the countdown has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Seconds left before the countdown fires, never negative.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
