//! Shared numeric constants for the motion crate.

// ── Navigation menu ─────────────────────────────────────────────

/// Duration of the container expand/collapse, in milliseconds.
pub const MENU_DURATION_MS: f64 = 400.0;

/// Height of the collapsed pill, in CSS pixels.
pub const MENU_COLLAPSED_HEIGHT_PX: f64 = 80.0;

/// Corner radius of the collapsed pill (half its height), in CSS pixels.
pub const MENU_COLLAPSED_RADIUS_PX: f64 = 40.0;

/// Viewport height assumed until the host reports one, in CSS pixels.
pub const DEFAULT_VIEWPORT_HEIGHT_PX: f64 = 800.0;

/// Raw container progress at which the item stagger is armed.
pub const STAGGER_TRIGGER_PROGRESS: f64 = 0.75;

/// Delay between consecutive menu items, in milliseconds.
pub const ITEM_STAGGER_MS: f64 = 70.0;

/// Duration of one item's entrance, in milliseconds.
pub const ITEM_DURATION_MS: f64 = 500.0;

/// Delay between consecutive social icons, in milliseconds.
pub const SOCIAL_STAGGER_MS: f64 = 50.0;

/// Social icons start this long before the last menu item finishes.
pub const SOCIAL_OVERLAP_MS: f64 = 300.0;

/// Distance a menu item rises while it fades in, in CSS pixels.
pub const ITEM_RISE_PX: f64 = 30.0;

/// Scroll offset beyond which the navbar switches to its elevated style.
pub const SCROLL_ELEVATION_PX: f64 = 20.0;

// ── Hamburger icon ──────────────────────────────────────────────

/// Vertical travel of the top and bottom bars when forming the X.
pub const ICON_BAR_TRAVEL_PX: f64 = 8.0;

/// Rotation of the top and bottom bars at full progress.
pub const ICON_BAR_ROTATION_DEG: f64 = 45.0;

// ── Background ──────────────────────────────────────────────────

/// Rotation added per frame per unit of normalized pointer offset.
pub const POINTER_ROTATION_GAIN: f64 = 0.001;

/// Upper bound on the render surface's device pixel ratio.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Vertical field of view of the background camera, in degrees.
pub const CAMERA_FOV_DEG: f64 = 75.0;

/// Distance of the camera from the origin along +z.
pub const CAMERA_Z: f64 = 30.0;

pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;

/// Full depth of the particle box (z spans `[-15, 15]`).
pub const PARTICLE_DEPTH: f64 = 30.0;

/// Camera travel per unit of page scroll ratio (parallax).
pub const SCROLL_PARALLAX: f64 = 5.0;

/// Fraction of the remaining parallax distance closed each frame.
pub const PARALLAX_SMOOTHING: f64 = 0.05;

// ── Starfield ───────────────────────────────────────────────────

/// Radius of the sphere the stars are scattered on.
pub const STAR_RADIUS: f64 = 100.0;

/// Self-rotation per frame around x, in radians.
pub const STAR_DRIFT_X: f64 = 0.000_05;

/// Self-rotation per frame around y, in radians.
pub const STAR_DRIFT_Y: f64 = 0.0001;
