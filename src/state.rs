//! Shared application state handed to every handler.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::services::inbox::Inbox;

#[derive(Clone, Debug)]
pub struct AppState {
    pub inbox: Inbox,
    pub contact_delay: Duration,
    pub site_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config, inbox: Inbox) -> Self {
        Self { inbox, contact_delay: config.contact_delay, site_dir: config.site_dir.clone() }
    }
}
