//! Reference [`Sprite`] implementation that tracks frame progress only.

use std::collections::HashMap;

use crate::capability::Sprite;

/// Frame duration applied whenever a state is (re)entered.
pub const DEFAULT_FRAME_DURATION: f32 = 100.0;

/// Frame-accurate animation tracker keyed by state label.
#[derive(Clone, Debug, PartialEq)]
pub struct Animator {
    frame_counts: HashMap<String, u32>,
    default_frame_count: u32,
    state: String,
    frame: u32,
    elapsed: f32,
    frame_duration: f32,
    repeat: bool,
    finished: bool,
}

impl Animator {
    /// Creates an animator starting in `state`.
    ///
    /// States without an entry in `frame_counts` use `default_frame_count`.
    #[must_use]
    pub fn new(state: &str, frame_counts: HashMap<String, u32>, default_frame_count: u32) -> Self {
        Self {
            frame_counts,
            default_frame_count: default_frame_count.max(1),
            state: state.to_owned(),
            frame: 0,
            elapsed: 0.0,
            frame_duration: DEFAULT_FRAME_DURATION,
            repeat: true,
            finished: false,
        }
    }

    /// Index of the frame currently displayed.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    fn last_frame(&self) -> u32 {
        self.frame_count().saturating_sub(1)
    }
}

impl Sprite for Animator {
    fn state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, state: &str) {
        state.clone_into(&mut self.state);
        self.frame = 0;
        self.elapsed = 0.0;
        self.frame_duration = DEFAULT_FRAME_DURATION;
        self.repeat = true;
        self.finished = false;
    }

    fn switch_state(&mut self, state: &str) {
        state.clone_into(&mut self.state);
        self.frame = self.frame.min(self.last_frame());
    }

    fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn frame_count(&self) -> u32 {
        self.frame_counts
            .get(&self.state)
            .copied()
            .unwrap_or(self.default_frame_count)
            .max(1)
    }

    fn set_frame_duration(&mut self, duration: f32) {
        self.frame_duration = duration;
    }

    fn animate(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        if !(self.frame_duration.is_finite() && self.frame_duration > 0.0) {
            if self.repeat {
                return;
            }
            self.frame = self.last_frame();
            self.finished = true;
            return;
        }

        self.elapsed += dt;
        while self.elapsed >= self.frame_duration {
            self.elapsed -= self.frame_duration;
            if self.frame < self.last_frame() {
                self.frame += 1;
            } else if self.repeat {
                self.frame = 0;
            } else {
                self.finished = true;
                break;
            }
        }
    }
}
