//! Starry sky: points scattered over a sphere that slowly turns on its own.
//!
//! Stars never move relative to each other and there is no bounds check;
//! the only motion is a constant self-rotation and a per-star twinkle.

#[cfg(test)]
#[path = "starfield_test.rs"]
mod starfield_test;

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use crate::camera::{Lens, Orientation};
use crate::consts::{STAR_DRIFT_X, STAR_DRIFT_Y, STAR_RADIUS};
use crate::particles::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTint {
    White,
    Purple,
    Pink,
}

impl StarTint {
    /// Pick a tint from a uniform sample in `[0, 1)`: the top tenth is
    /// purple, the next tenth pink, the rest white.
    #[must_use]
    pub fn from_sample(sample: f64) -> Self {
        if sample > 0.9 {
            Self::Purple
        } else if sample > 0.8 {
            Self::Pink
        } else {
            Self::White
        }
    }

    #[must_use]
    pub fn rgb(self) -> Rgb {
        match self {
            Self::White => Rgb::WHITE,
            Self::Purple => Rgb::from_unit(0.6, 0.2, 1.0),
            Self::Pink => Rgb::from_unit(1.0, 0.4, 0.8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: DVec3,
    /// Base point size in CSS pixels before pixel ratio and twinkle.
    pub size: f64,
    pub tint: StarTint,
}

impl Star {
    /// Size multiplier at `elapsed_s`, oscillating in `[0.8, 1.0]`.
    #[must_use]
    pub fn twinkle(&self, elapsed_s: f64) -> f64 {
        let p = self.position;
        (elapsed_s * 0.2 + p.x + p.y + p.z).sin() * 0.1 + 0.9
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarConfig {
    pub count: usize,
    pub radius: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self { count: 2000, radius: STAR_RADIUS }
    }
}

impl StarConfig {
    /// The starry sky is viewed through a narrower lens placed closer in.
    #[must_use]
    pub fn lens() -> Lens {
        Lens { fov_deg: 60.0, distance: 20.0, ..Lens::default() }
    }
}

#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Scatter stars uniformly over the sphere surface.
    #[must_use]
    pub fn new(config: StarConfig, rng: &mut impl Rng) -> Self {
        let stars = (0..config.count)
            .map(|_| {
                let theta = rng.random::<f64>() * TAU;
                let phi = (2.0 * rng.random::<f64>() - 1.0).acos();
                let (sin_phi, cos_phi) = phi.sin_cos();
                let position = config.radius * DVec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi);
                Star {
                    position,
                    size: rng.random::<f64>() * 2.0 + 0.5,
                    tint: StarTint::from_sample(rng.random()),
                }
            })
            .collect();
        Self { stars }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Apply one frame of the constant self-rotation.
    pub fn drift(orientation: &mut Orientation) {
        orientation.turn(STAR_DRIFT_X, STAR_DRIFT_Y);
    }
}
