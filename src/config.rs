//! Process configuration loaded from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default so the service starts with no environment at
//! all. Lookups go through a caller-supplied function so tests can feed a
//! fixed table instead of mutating the process environment.
//!
//! ERROR HANDLING
//! ==============
//! `PORT` is the only value that can fail startup: a typo there would bind
//! somewhere unexpected. Tuning knobs fall back to their defaults when they
//! do not parse.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_DIR: &str = "dist/public";
pub const DEFAULT_CONTACT_DELAY_MS: u64 = 500;
pub const DEFAULT_CONTACT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}

/// Typed service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port bound on all interfaces.
    pub port: u16,
    /// Directory holding the built single-page site.
    pub site_dir: PathBuf,
    /// Simulated processing time before a valid submission is accepted.
    pub contact_delay: Duration,
    /// Bounded capacity of the contact inbox queue.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            contact_delay: Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
            queue_capacity: DEFAULT_CONTACT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is set but not a `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve each variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is present but not a `u16`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let site_dir = lookup("SITE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SITE_DIR), PathBuf::from);
        let delay_ms = env_parse(&lookup, "CONTACT_DELAY_MS", DEFAULT_CONTACT_DELAY_MS);
        let queue_capacity = env_parse(&lookup, "CONTACT_QUEUE_CAPACITY", DEFAULT_CONTACT_QUEUE_CAPACITY).max(1);

        Ok(Self { port, site_dir, contact_delay: Duration::from_millis(delay_ms), queue_capacity })
    }
}

pub(crate) fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
