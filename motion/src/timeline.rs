//! Reversible tween and transition identity.
//!
//! A [`Tween`] is the timeline primitive the menu is built on: a linear
//! progress scalar in `[0, 1]` that plays toward one end and can be turned
//! around mid-flight without resetting. Easing is applied by the consumer.
//!
//! Every transition a controller starts is stamped with a fresh
//! [`TransitionId`]. Completions are matched against the id of the transition
//! currently in flight, so a completion belonging to a replaced transition is
//! recognizably stale.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

/// Generation token for one started (or reversed) transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

impl TransitionId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic issuer of [`TransitionId`]s.
#[derive(Debug, Clone, Default)]
pub struct TransitionIds {
    next: u64,
}

impl TransitionIds {
    pub fn issue(&mut self) -> TransitionId {
        self.next += 1;
        TransitionId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone)]
pub struct Tween {
    duration_ms: f64,
    progress: f64,
    direction: Direction,
    playing: bool,
}

impl Tween {
    /// A paused tween at progress 0. Non-positive durations complete on the
    /// first advance.
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms: duration_ms.max(0.0), progress: 0.0, direction: Direction::Forward, playing: false }
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether progress sits at the end the tween is heading toward.
    #[must_use]
    pub fn at_target(&self) -> bool {
        match self.direction {
            Direction::Forward => self.progress >= 1.0,
            Direction::Reverse => self.progress <= 0.0,
        }
    }

    /// Play toward 1 from the current progress.
    pub fn play_forward(&mut self) {
        self.direction = Direction::Forward;
        self.playing = !self.at_target();
    }

    /// Play toward 0 from the current progress.
    pub fn play_reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.playing = !self.at_target();
    }

    /// Move progress by `dt_ms`. Returns `true` on the step that reaches the
    /// target; the tween is paused afterwards.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if !self.playing {
            return false;
        }
        let dt = dt_ms.max(0.0);
        let step = if self.duration_ms > 0.0 { dt / self.duration_ms } else { 1.0 };
        self.progress = match self.direction {
            Direction::Forward => (self.progress + step).min(1.0),
            Direction::Reverse => (self.progress - step).max(0.0),
        };
        if self.at_target() {
            self.playing = false;
            return true;
        }
        false
    }

    /// Jump to `progress` without changing direction or play state.
    pub fn seek(&mut self, progress: f64) {
        self.progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    }

    /// Jump to the end the tween is heading toward and pause.
    pub fn finish(&mut self) {
        self.progress = match self.direction {
            Direction::Forward => 1.0,
            Direction::Reverse => 0.0,
        };
        self.playing = false;
    }

    /// Stop playing and rewind to 0.
    pub fn kill(&mut self) {
        self.playing = false;
        self.progress = 0.0;
        self.direction = Direction::Forward;
    }
}
