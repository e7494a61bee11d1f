//! Browser-side motion for the agency site, compiled to WebAssembly.
//!
//! Two independent leaf components live here: the mobile navigation menu and
//! the animated page backgrounds. Their state machines and simulations are
//! plain Rust with no browser types, so they build and test natively; only
//! [`render`] and [`web`] touch the DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`menu`] | Navigation menu controller and per-frame visual output |
//! | [`menu_driver`] | Frame scheduling for the menu, settling when frames are unavailable |
//! | [`stagger`] | Staggered entrance of menu items and social icons |
//! | [`timeline`] | Reversible tween and transition identity |
//! | [`ease`] | Easing curves |
//! | [`background`] | Background loop, scheduler/host/surface traits, frames |
//! | [`particles`] | Bounded particle field with reflection, colors |
//! | [`starfield`] | Star sphere variant |
//! | [`camera`] | Viewport, pointer, orientation, projection, parallax |
//! | [`render`] | 2D canvas surface |
//! | [`web`] | `wasm-bindgen` exports |
//! | [`consts`] | Shared numeric constants |

pub mod background;
pub mod camera;
pub mod consts;
pub mod ease;
pub mod menu;
pub mod menu_driver;
pub mod particles;
pub mod render;
pub mod stagger;
pub mod starfield;
pub mod timeline;
pub mod web;
