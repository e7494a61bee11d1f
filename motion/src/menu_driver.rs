//! Frame pump for the navigation menu.
//!
//! [`MenuDriver`] asks its [`Scheduler`] for a frame whenever the controller
//! has something in motion, and feeds elapsed time back into it. When no
//! frame can be scheduled the controller is finished on the spot, so a
//! started transition always settles. Once destroyed the driver ignores
//! further input.

#[cfg(test)]
#[path = "menu_driver_test.rs"]
mod menu_driver_test;

use site::content::NavLink;

use crate::background::{FrameHandle, Scheduler};
use crate::menu::{MenuController, Navigation};
use crate::timeline::TransitionId;

pub struct MenuDriver<S: Scheduler> {
    controller: MenuController,
    scheduler: S,
    pending: Option<FrameHandle>,
    last_ms: Option<f64>,
    destroyed: bool,
}

impl<S: Scheduler> MenuDriver<S> {
    #[must_use]
    pub fn new(controller: MenuController, scheduler: S) -> Self {
        Self { controller, scheduler, pending: None, last_ms: None, destroyed: false }
    }

    #[must_use]
    pub fn controller(&self) -> &MenuController {
        &self.controller
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Toggle the menu. `None` once destroyed.
    pub fn toggle(&mut self) -> Option<TransitionId> {
        if self.destroyed {
            return None;
        }
        let id = self.controller.toggle();
        self.ensure_running();
        Some(id)
    }

    /// Close for navigation. `None` once destroyed.
    pub fn select_link(&mut self, link: NavLink) -> Option<Navigation> {
        if self.destroyed {
            return None;
        }
        let navigation = self.controller.select_link(link);
        self.ensure_running();
        Some(navigation)
    }

    /// Returns the new elevated flag, or `false` once destroyed.
    pub fn on_scroll(&mut self, offset_y: f64) -> bool {
        !self.destroyed && self.controller.on_scroll(offset_y)
    }

    pub fn set_viewport_height(&mut self, height_px: f64) {
        if !self.destroyed {
            self.controller.set_viewport_height(height_px);
        }
    }

    /// Run one frame. A handle other than the pending one is ignored.
    /// Returns whether the frame was applied.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> bool {
        if self.destroyed || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        let dt = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        if let Some(settled) = self.controller.advance(dt) {
            log::debug!("menu: settled {:?}", settled.phase);
        }
        self.ensure_running();
        true
    }

    /// Cancel the pending frame and tear the controller down. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.controller.teardown();
        self.last_ms = None;
        self.destroyed = true;
    }

    fn ensure_running(&mut self) {
        if !self.controller.needs_frame() {
            self.last_ms = None;
            return;
        }
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("menu: no frame scheduler, finishing without animation");
            self.controller.finish();
            self.last_ms = None;
        }
    }
}
