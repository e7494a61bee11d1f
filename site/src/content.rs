//! Closed lookup tables for navigation, social links, services, and contact
//! channels. Each table is an enum with total `match` accessors, so adding a
//! variant without its icon or label is a compile error.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// NAVIGATION
// =============================================================================

/// Top-level pages reachable from the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavLink {
    Home,
    Services,
    Projects,
    About,
    Contact,
}

impl NavLink {
    /// Menu order.
    pub const ALL: [Self; 5] = [Self::Home, Self::Services, Self::Projects, Self::About, Self::Contact];

    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Services => "/services",
            Self::Projects => "/projects",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Services => "Services",
            Self::Projects => "Projects",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    /// Font Awesome class shown above the label in the mobile menu.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "fa-home",
            Self::Services => "fa-cogs",
            Self::Projects => "fa-briefcase",
            Self::About => "fa-info-circle",
            Self::Contact => "fa-envelope",
        }
    }

    /// Resolve a route path. A trailing slash is ignored.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        let path = match href.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL.into_iter().find(|link| link.href() == path)
    }
}

// =============================================================================
// SOCIAL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Twitter,
    Instagram,
    LinkedIn,
    Github,
    Facebook,
    Youtube,
}

impl SocialIcon {
    /// Icons revealed at the bottom of the mobile menu.
    pub const MENU: [Self; 3] = [Self::Twitter, Self::Instagram, Self::LinkedIn];

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Twitter => "fab fa-twitter",
            Self::Instagram => "fab fa-instagram",
            Self::LinkedIn => "fab fa-linkedin-in",
            Self::Github => "fab fa-github",
            Self::Facebook => "fab fa-facebook-f",
            Self::Youtube => "fab fa-youtube",
        }
    }
}

// =============================================================================
// SERVICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Seo,
    Design,
    Development,
    Ecommerce,
    Redesign,
    Responsive,
    Marketing,
    Support,
}

impl ServiceKind {
    pub const ALL: [Self; 8] = [
        Self::Seo,
        Self::Design,
        Self::Development,
        Self::Ecommerce,
        Self::Redesign,
        Self::Responsive,
        Self::Marketing,
        Self::Support,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Seo => "seo",
            Self::Design => "design",
            Self::Development => "development",
            Self::Ecommerce => "ecommerce",
            Self::Redesign => "redesign",
            Self::Responsive => "responsive",
            Self::Marketing => "marketing",
            Self::Support => "support",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Seo => "fa-search",
            Self::Design => "fa-paint-brush",
            Self::Development => "fa-code",
            Self::Ecommerce => "fa-shopping-cart",
            Self::Redesign => "fa-sync",
            Self::Responsive => "fa-mobile-alt",
            Self::Marketing => "fa-bullhorn",
            Self::Support => "fa-headset",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Seo => "SEO Optimization",
            Self::Design => "Landing Page Design",
            Self::Development => "Custom Web/App Development",
            Self::Ecommerce => "E-Commerce Development",
            Self::Redesign => "Website Redesign",
            Self::Responsive => "Responsive Web Design",
            Self::Marketing => "Digital Marketing",
            Self::Support => "Maintenance & Support",
        }
    }

    /// Case-insensitive lookup by key. Unknown keys are `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

// =============================================================================
// CONTACT CHANNELS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Email,
    Phone,
    Location,
    Hours,
}

impl ContactChannel {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Email => "fas fa-envelope",
            Self::Phone => "fas fa-phone",
            Self::Location => "fas fa-map-marker-alt",
            Self::Hours => "fas fa-clock",
        }
    }
}
