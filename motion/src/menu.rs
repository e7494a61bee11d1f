//! Navigation menu controller: open/close state machine, the shared progress
//! scalar, and everything derived from it.
//!
//! ```text
//! Closed --toggle--> Opening --settle--> Open
//!   ^                  |  ^                |
//!   |               toggle toggle        toggle
//!   |                  v  |                v
//!   +------settle---- Closing <------------+
//! ```
//!
//! `select_link` forces `Closing` from any moving or open state. Reversals
//! resume from the current progress. Each started transition gets a fresh
//! [`TransitionId`]; a completion for any other id is ignored, so a replaced
//! transition can never flip `is_open` or clear `is_animating` for its
//! successor.
//!
//! The container, the hamburger icon, and the stagger trigger all read the
//! same [`Tween`]; they cannot drift apart.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use site::content::{NavLink, SocialIcon};

use crate::consts::{
    DEFAULT_VIEWPORT_HEIGHT_PX, ICON_BAR_ROTATION_DEG, ICON_BAR_TRAVEL_PX, MENU_COLLAPSED_HEIGHT_PX,
    MENU_COLLAPSED_RADIUS_PX, MENU_DURATION_MS, SCROLL_ELEVATION_PX,
};
use crate::ease::Ease;
use crate::stagger::{Heading, Stagger};
use crate::timeline::{Direction, TransitionId, TransitionIds, Tween};

/// Where the menu is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl MenuPhase {
    /// Whether a container transition is in flight.
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Whether the menu is open or heading open.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// Snapshot of the menu flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
    pub is_animating: bool,
    /// Cosmetic navbar variant once the page has scrolled. Independent of
    /// the open/close logic.
    pub scroll_elevated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuConfig {
    pub duration_ms: f64,
    pub ease: Ease,
    /// Height the container expands to, in CSS pixels.
    pub viewport_height_px: f64,
    pub item_count: usize,
    pub social_count: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            duration_ms: MENU_DURATION_MS,
            ease: Ease::Power3InOut,
            viewport_height_px: DEFAULT_VIEWPORT_HEIGHT_PX,
            item_count: NavLink::ALL.len(),
            social_count: SocialIcon::MENU.len(),
        }
    }
}

/// Result of selecting a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub link: NavLink,
    /// The closing transition, if the menu was not already closed.
    pub transition: Option<TransitionId>,
}

/// A transition reached its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub id: TransitionId,
    pub phase: MenuPhase,
}

/// Pose of the three hamburger bars. At progress 0 they are parallel; at 1
/// the outer bars cross into an X and the middle bar is gone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconPose {
    pub top_offset_px: f64,
    pub top_rotation_deg: f64,
    pub middle_opacity: f64,
    pub bottom_offset_px: f64,
    pub bottom_rotation_deg: f64,
}

impl IconPose {
    #[must_use]
    pub fn at(progress: f64) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            top_offset_px: ICON_BAR_TRAVEL_PX * p,
            top_rotation_deg: ICON_BAR_ROTATION_DEG * p,
            // The middle bar is gone by the halfway point.
            middle_opacity: 1.0 - (p * 2.0).min(1.0),
            bottom_offset_px: -ICON_BAR_TRAVEL_PX * p,
            bottom_rotation_deg: -ICON_BAR_ROTATION_DEG * p,
        }
    }
}

/// Everything the host needs to paint one frame of the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFrame {
    /// Eased progress shared by container and icon.
    pub progress: f64,
    pub container_height_px: f64,
    pub corner_radius_px: f64,
    pub icon: IconPose,
    pub items: Vec<f64>,
    pub socials: Vec<f64>,
}

pub struct MenuController {
    config: MenuConfig,
    phase: MenuPhase,
    tween: Tween,
    ids: TransitionIds,
    active: Option<TransitionId>,
    stagger: Stagger,
    scroll_elevated: bool,
    stale_completions: u64,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl MenuController {
    #[must_use]
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            phase: MenuPhase::Closed,
            tween: Tween::new(config.duration_ms),
            ids: TransitionIds::default(),
            active: None,
            stagger: Stagger::new(config.item_count, config.social_count),
            scroll_elevated: false,
            stale_completions: 0,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        MenuState {
            is_open: self.phase.is_open(),
            is_animating: self.phase.is_animating(),
            scroll_elevated: self.scroll_elevated,
        }
    }

    /// Raw (uneased) progress in `[0, 1]`.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        self.tween.progress()
    }

    /// Transition currently awaiting completion.
    #[must_use]
    pub fn active_transition(&self) -> Option<TransitionId> {
        self.active
    }

    /// Completions ignored because their transition had been replaced.
    #[must_use]
    pub fn stale_completions(&self) -> u64 {
        self.stale_completions
    }

    /// Whether the host should keep scheduling frames.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.phase.is_animating() || self.stagger.in_motion(self.heading())
    }

    #[must_use]
    pub fn frame(&self) -> MenuFrame {
        let progress = self.config.ease.apply(self.tween.progress());
        MenuFrame {
            progress,
            container_height_px: lerp(MENU_COLLAPSED_HEIGHT_PX, self.config.viewport_height_px, progress),
            corner_radius_px: lerp(MENU_COLLAPSED_RADIUS_PX, 0.0, progress),
            icon: IconPose::at(progress),
            items: self.stagger.item_reveals(),
            socials: self.stagger.social_reveals(),
        }
    }

    // --- Inputs ---

    /// Invert the open state. An in-flight transition is turned around from
    /// its current progress.
    pub fn toggle(&mut self) -> TransitionId {
        let target = if self.phase.is_open() { MenuPhase::Closing } else { MenuPhase::Opening };
        self.begin(target)
    }

    /// Navigate and force the menu closed, preempting any opening.
    pub fn select_link(&mut self, link: NavLink) -> Navigation {
        self.stagger.cancel();
        let transition = match self.phase {
            MenuPhase::Closed => None,
            MenuPhase::Closing => self.active,
            MenuPhase::Opening | MenuPhase::Open => Some(self.begin(MenuPhase::Closing)),
        };
        log::debug!("menu: navigate to {}", link.href());
        Navigation { link, transition }
    }

    /// Update the elevated navbar style from the page scroll offset.
    /// Returns the new flag.
    pub fn on_scroll(&mut self, offset_y: f64) -> bool {
        self.scroll_elevated = offset_y > SCROLL_ELEVATION_PX;
        self.scroll_elevated
    }

    /// Height the open container expands to.
    pub fn set_viewport_height(&mut self, height_px: f64) {
        if height_px.is_finite() && height_px > 0.0 {
            self.config.viewport_height_px = height_px;
        }
    }

    /// Drive the transition by one frame.
    pub fn advance(&mut self, dt_ms: f64) -> Option<Settled> {
        let finished = self.tween.advance(dt_ms);
        let heading = self.heading();
        self.stagger.update(dt_ms, self.tween.progress(), heading);
        if !finished {
            return None;
        }
        let id = self.active?;
        self.settle(id)
    }

    /// Report that transition `id` finished on an external timeline.
    /// Completions for replaced transitions are ignored.
    pub fn complete(&mut self, id: TransitionId) -> Option<Settled> {
        if self.active != Some(id) {
            self.stale_completions += 1;
            log::debug!("menu: ignoring stale completion {}", id.get());
            return None;
        }
        self.tween.finish();
        self.settle(id)
    }

    /// Jump to the end of everything in motion: the active transition
    /// settles and an opened menu shows every item. Used when frames can no
    /// longer be scheduled.
    pub fn finish(&mut self) -> Option<Settled> {
        let settled = self.active.and_then(|id| self.complete(id));
        if self.phase == MenuPhase::Open {
            self.stagger.update(self.stagger.total_ms(), 1.0, Heading::Opening);
        }
        settled
    }

    /// Cancel everything in flight and return to a closed, idle menu.
    pub fn teardown(&mut self) {
        self.tween.kill();
        self.stagger.cancel();
        self.active = None;
        self.phase = MenuPhase::Closed;
    }

    // --- Internals ---

    fn heading(&self) -> Heading {
        match self.tween.direction() {
            Direction::Forward => Heading::Opening,
            Direction::Reverse => Heading::Closing,
        }
    }

    fn begin(&mut self, phase: MenuPhase) -> TransitionId {
        let id = self.ids.issue();
        self.active = Some(id);
        self.phase = phase;
        match phase {
            MenuPhase::Opening => self.tween.play_forward(),
            _ => self.tween.play_reverse(),
        }
        log::debug!("menu: transition {} -> {:?}", id.get(), phase);
        if self.tween.at_target() {
            self.settle(id);
        }
        id
    }

    fn settle(&mut self, id: TransitionId) -> Option<Settled> {
        let phase = match self.phase {
            MenuPhase::Opening => MenuPhase::Open,
            MenuPhase::Closing => MenuPhase::Closed,
            MenuPhase::Open | MenuPhase::Closed => return None,
        };
        self.phase = phase;
        self.active = None;
        match phase {
            // A completion reported externally may skip the trigger frame.
            MenuPhase::Open => self.stagger.update(0.0, 1.0, Heading::Opening),
            _ => self.stagger.cancel(),
        }
        Some(Settled { id, phase })
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
