//! Staggered entrance of menu items and social icons.
//!
//! The sequence is derived from a single elapsed-time value, so cancelling
//! it is a reset of that value: there are no per-item timers to clean up.
//! Items start [`ITEM_STAGGER_MS`] apart; the social icons start
//! [`SOCIAL_OVERLAP_MS`] before the last item finishes.

#[cfg(test)]
#[path = "stagger_test.rs"]
mod stagger_test;

use crate::consts::{ITEM_DURATION_MS, ITEM_STAGGER_MS, SOCIAL_OVERLAP_MS, SOCIAL_STAGGER_MS, STAGGER_TRIGGER_PROGRESS};
use crate::ease::{Ease, ITEM_OVERSHOOT, SOCIAL_OVERSHOOT};

/// Whether the container is heading open or closed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Opening,
    Closing,
}

#[derive(Debug, Clone)]
pub struct Stagger {
    item_count: usize,
    social_count: usize,
    elapsed_ms: f64,
    armed: bool,
}

impl Stagger {
    #[must_use]
    pub fn new(item_count: usize, social_count: usize) -> Self {
        Self { item_count, social_count, elapsed_ms: 0.0, armed: false }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Start offset of the first social icon.
    #[must_use]
    pub fn social_start_ms(&self) -> f64 {
        let last_item_start = self.item_count.saturating_sub(1) as f64 * ITEM_STAGGER_MS;
        (last_item_start + ITEM_DURATION_MS - SOCIAL_OVERLAP_MS).max(0.0)
    }

    /// Time at which every element has fully entered.
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        let items_end = if self.item_count == 0 {
            0.0
        } else {
            (self.item_count - 1) as f64 * ITEM_STAGGER_MS + ITEM_DURATION_MS
        };
        let socials_end = if self.social_count == 0 {
            0.0
        } else {
            self.social_start_ms() + (self.social_count - 1) as f64 * SOCIAL_STAGGER_MS + ITEM_DURATION_MS
        };
        items_end.max(socials_end)
    }

    /// Advance by `dt_ms` given the container's raw progress after this step.
    ///
    /// Opening arms the sequence once progress crosses the trigger point.
    /// Closing plays it backwards, and cancels it outright once the
    /// container shrinks below the trigger point.
    pub fn update(&mut self, dt_ms: f64, container_progress: f64, heading: Heading) {
        let dt = dt_ms.max(0.0);
        match heading {
            Heading::Opening => {
                if !self.armed && container_progress >= STAGGER_TRIGGER_PROGRESS {
                    self.armed = true;
                }
                if self.armed {
                    self.elapsed_ms = (self.elapsed_ms + dt).min(self.total_ms());
                }
            }
            Heading::Closing => {
                if container_progress < STAGGER_TRIGGER_PROGRESS {
                    self.cancel();
                } else if self.armed {
                    self.elapsed_ms = (self.elapsed_ms - dt).max(0.0);
                }
            }
        }
    }

    /// Whether another frame would change any reveal value.
    #[must_use]
    pub fn in_motion(&self, heading: Heading) -> bool {
        if !self.armed {
            return false;
        }
        match heading {
            Heading::Opening => self.elapsed_ms < self.total_ms(),
            Heading::Closing => self.elapsed_ms > 0.0,
        }
    }

    /// Drop the sequence: every element returns to hidden.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0.0;
    }

    /// Reveal value of each menu item. May briefly exceed 1.0 (overshoot).
    #[must_use]
    pub fn item_reveals(&self) -> Vec<f64> {
        (0..self.item_count)
            .map(|i| reveal(self.elapsed_ms, i as f64 * ITEM_STAGGER_MS, ITEM_OVERSHOOT))
            .collect()
    }

    /// Reveal value of each social icon. May briefly exceed 1.0 (overshoot).
    #[must_use]
    pub fn social_reveals(&self) -> Vec<f64> {
        let start = self.social_start_ms();
        (0..self.social_count)
            .map(|i| reveal(self.elapsed_ms, start + i as f64 * SOCIAL_STAGGER_MS, SOCIAL_OVERSHOOT))
            .collect()
    }
}

fn reveal(elapsed_ms: f64, start_ms: f64, overshoot: f64) -> f64 {
    if elapsed_ms <= start_ms {
        return 0.0;
    }
    let t = ((elapsed_ms - start_ms) / ITEM_DURATION_MS).min(1.0);
    Ease::BackOut { overshoot }.apply(t)
}
