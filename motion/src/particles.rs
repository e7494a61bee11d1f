//! Bounded particle field with per-axis reflection.
//!
//! Positions live in a box centred on the origin. Each frame every particle
//! moves by its velocity; any axis that ends up past its half-extent has its
//! velocity negated. Position is never clamped, so a particle can overshoot
//! by at most one step before heading back in.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use std::str::FromStr;

use glam::DVec3;
use rand::Rng;

use crate::consts::PARTICLE_DEPTH;

/// Rejected background configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidNumber { name: &'static str, value: f64 },
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };

    /// Build from unit-range channels.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self { r: unit_channel(r), g: unit_channel(g), b: unit_channel(b) }
    }

    /// CSS `rgba()` string with the given alpha.
    #[must_use]
    pub fn css(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self { r: channel(&hex[0..2])?, g: channel(&hex[2..4])?, b: channel(&hex[4..6])? }),
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self { r: short(0)?, g: short(1)?, b: short(2)? })
            }
            _ => Err(invalid()),
        }
    }
}

/// Per-instance configuration, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub color: Rgb,
    /// Point size in world units.
    pub size: f64,
    /// Velocity components are drawn from `[-speed/2, speed/2]`.
    pub speed: f64,
    pub opacity: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { count: 100, color: Rgb::WHITE, size: 0.5, speed: 0.05, opacity: 0.6 }
    }
}

impl ParticleConfig {
    /// Validate raw host-provided values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable color or a negative or
    /// non-finite size or speed.
    pub fn parse(count: usize, color: &str, size: f64, speed: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            count,
            color: color.parse()?,
            size: non_negative("size", size)?,
            speed: non_negative("speed", speed)?,
            ..Self::default()
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(value) } else { Err(ConfigError::InvalidNumber { name, value }) }
}

/// Full extent of the particle box in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Bounds {
    /// Box matching the viewport in x/y with the fixed particle depth.
    #[must_use]
    pub fn for_viewport(width: f64, height: f64) -> Self {
        Self { width, height, depth: PARTICLE_DEPTH }
    }

    /// Half-extent on each axis.
    #[must_use]
    pub fn half(&self) -> DVec3 {
        DVec3::new(self.width, self.height, self.depth) * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl Particle {
    /// Move one step and reflect any axis that ended past `half`.
    pub fn step(&mut self, half: DVec3) {
        self.position += self.velocity;
        for axis in 0..3 {
            if self.position[axis].abs() > half[axis] {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticleConfig,
    bounds: Bounds,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Scatter `config.count` particles uniformly through `bounds`.
    #[must_use]
    pub fn new(config: ParticleConfig, bounds: Bounds, rng: &mut impl Rng) -> Self {
        let half = bounds.half();
        let v = config.speed.abs() / 2.0;
        let particles = (0..config.count)
            .map(|_| Particle {
                position: DVec3::new(symmetric(rng, half.x), symmetric(rng, half.y), symmetric(rng, half.z)),
                velocity: DVec3::new(symmetric(rng, v), symmetric(rng, v), symmetric(rng, v)),
            })
            .collect();
        Self { config, bounds, particles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let half = self.bounds.half();
        for p in &mut self.particles {
            p.step(half);
        }
    }
}

fn symmetric(rng: &mut impl Rng, half: f64) -> f64 {
    if half > 0.0 { rng.random_range(-half..=half) } else { 0.0 }
}
