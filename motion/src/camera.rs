//! Viewport, pointer, orientation, and perspective projection for the
//! animated backgrounds.
//!
//! The camera sits on the +z axis looking at the origin. Pointer movement
//! never touches individual points: it accumulates into an [`Orientation`]
//! that rotates the whole field at projection time.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::f64::consts::TAU;

use glam::DVec3;

use crate::consts::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, MAX_PIXEL_RATIO, PARALLAX_SMOOTHING, POINTER_ROTATION_GAIN,
    SCROLL_PARALLAX,
};

/// Size of the render surface in CSS pixels plus its device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Dimensions are floored at one pixel; the pixel ratio is clamped to
    /// `[1, MAX_PIXEL_RATIO]`.
    #[must_use]
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pixel_ratio: if pixel_ratio.is_finite() { pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO) } else { 1.0 },
        }
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Backing-store size in device pixels.
    #[must_use]
    pub fn device_size(&self) -> (u32, u32) {
        (to_device(self.width * self.pixel_ratio), to_device(self.height * self.pixel_ratio))
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_device(v: f64) -> u32 {
    v.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Pointer position normalized to `[-1, 1]` on both axes, y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Clamp both components into `[-1, 1]`. Non-finite input maps to 0.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: unit(x), y: unit(y) }
    }

    /// Map raw client coordinates against the viewport: left edge -1, right
    /// edge +1, top +1, bottom -1.
    #[must_use]
    pub fn from_client(client_x: f64, client_y: f64, viewport: &Viewport) -> Self {
        Self::new(client_x / viewport.width * 2.0 - 1.0, -(client_y / viewport.height) * 2.0 + 1.0)
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Accumulated rotation of the whole field, in radians, kept in `[0, TAU)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
}

impl Orientation {
    /// Add a small pointer-proportional increment. Horizontal pointer offset
    /// turns the field about y; vertical offset about x.
    pub fn nudge(&mut self, pointer: Pointer) {
        self.turn(pointer.y * POINTER_ROTATION_GAIN, pointer.x * POINTER_ROTATION_GAIN);
    }

    /// Add a raw increment about each axis.
    pub fn turn(&mut self, dx: f64, dy: f64) {
        self.x = wrap(self.x + dx);
        self.y = wrap(self.y + dy);
    }

    /// Rotate `p` about y, then about x.
    #[must_use]
    pub fn apply(&self, p: DVec3) -> DVec3 {
        let (sy, cy) = self.y.sin_cos();
        let about_y = DVec3::new(p.x * cy + p.z * sy, p.y, -p.x * sy + p.z * cy);
        let (sx, cx) = self.x.sin_cos();
        DVec3::new(about_y.x, about_y.y * cx - about_y.z * sx, about_y.y * sx + about_y.z * cx)
    }
}

fn wrap(angle: f64) -> f64 {
    if angle.is_finite() { angle.rem_euclid(TAU) } else { 0.0 }
}

/// Camera optics for one background variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Distance of the camera from the origin along +z.
    pub distance: f64,
}

impl Default for Lens {
    fn default() -> Self {
        Self { fov_deg: CAMERA_FOV_DEG, near: CAMERA_NEAR, far: CAMERA_FAR, distance: CAMERA_Z }
    }
}

/// A projected point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// CSS pixels per world unit at this depth.
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Viewport,
    pub lens: Lens,
    /// Vertical camera offset (scroll parallax).
    pub camera_y: f64,
}

impl Projection {
    #[must_use]
    pub fn new(viewport: Viewport, lens: Lens) -> Self {
        Self { viewport, lens, camera_y: 0.0 }
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.viewport.aspect()
    }

    /// Perspective-project a world point. Points behind the near plane,
    /// beyond the far plane, or outside the frustum yield `None`.
    #[must_use]
    pub fn project(&self, point: DVec3) -> Option<ScreenPoint> {
        let rel = point - DVec3::new(0.0, self.camera_y, self.lens.distance);
        let depth = -rel.z;
        if depth < self.lens.near || depth > self.lens.far {
            return None;
        }
        let focal = 1.0 / (self.lens.fov_deg.to_radians() / 2.0).tan();
        let ndc_x = rel.x * focal / (self.aspect() * depth);
        let ndc_y = rel.y * focal / depth;
        if ndc_x.abs() > 1.0 || ndc_y.abs() > 1.0 {
            return None;
        }
        let half_h = self.viewport.height / 2.0;
        Some(ScreenPoint {
            x: (ndc_x + 1.0) * self.viewport.width / 2.0,
            y: (1.0 - ndc_y) * half_h,
            scale: focal / depth * half_h,
        })
    }
}

/// Scroll-driven camera offset that eases toward its target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Parallax {
    pub current: f64,
    pub target: f64,
}

impl Parallax {
    /// `ratio` is the page scroll position over its maximum, clamped to
    /// `[0, 1]`.
    pub fn set_ratio(&mut self, ratio: f64) {
        let r = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        self.target = -r * SCROLL_PARALLAX;
    }

    /// Close a fixed fraction of the remaining distance.
    pub fn step(&mut self) -> f64 {
        self.current += (self.target - self.current) * PARALLAX_SMOOTHING;
        self.current
    }
}
