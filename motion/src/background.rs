//! Background animation loop.
//!
//! DESIGN
//! ======
//! [`BackgroundLoop`] owns the simulated field and everything the frame
//! callback touches. The browser is reached only through two traits:
//! [`Host`] creates surfaces and schedules frames through its [`Scheduler`]
//! supertrait, and [`RenderSurface`] paints a [`Frame`]. Tests drive the
//! loop with a scripted host.
//!
//! Exactly one frame request is outstanding while running. Its handle is
//! remembered so `stop` can cancel it, and a callback carrying any other
//! handle is ignored. Within one tick every point is updated before the
//! frame is handed to the surface.
//!
//! ERROR HANDLING
//! ==============
//! The background is decoration. Failing to create a surface, schedule a
//! frame, or draw one is logged and the loop degrades to doing nothing;
//! no error reaches the caller of `start`.

#[cfg(test)]
#[path = "background_test.rs"]
mod background_test;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::camera::{Lens, Orientation, Parallax, Pointer, Projection, Viewport};
use crate::particles::{Bounds, ParticleConfig, ParticleField, Rgb};
use crate::starfield::{StarConfig, StarField};

/// Smallest radius a visible point is drawn with, in CSS pixels.
const MIN_SPRITE_RADIUS_PX: f64 = 0.5;

// =============================================================================
// Host seams
// =============================================================================

/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no container to attach the surface to")]
    NoContainer,
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("surface operation failed: {0}")]
    Backend(String),
}

pub trait RenderSurface {
    /// Match the backing store and aspect ratio to `projection`.
    fn resize(&mut self, projection: &Projection);

    /// Paint one frame.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects a drawing call.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError>;

    /// Detach and drop backend resources. Called at most once.
    fn release(&mut self);
}

/// Per-frame callback scheduling, shared by the background loop and the menu.
pub trait Scheduler {
    /// Schedule one frame callback. `None` if scheduling is unavailable.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait Host: Scheduler {
    type Surface: RenderSurface;

    /// Allocate a surface sized to `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when the environment cannot provide one.
    fn create_surface(&mut self, viewport: Viewport) -> Result<Self::Surface, SurfaceError>;
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSpec {
    Particles(ParticleConfig),
    Stars(StarConfig),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundConfig {
    pub field: FieldSpec,
    pub lens: Lens,
    /// Seed for the field's initial layout.
    pub seed: u64,
}

impl BackgroundConfig {
    #[must_use]
    pub fn particles(config: ParticleConfig, seed: u64) -> Self {
        Self { field: FieldSpec::Particles(config), lens: Lens::default(), seed }
    }

    #[must_use]
    pub fn stars(config: StarConfig, seed: u64) -> Self {
        Self { field: FieldSpec::Stars(config), lens: StarConfig::lens(), seed }
    }
}

// =============================================================================
// Field
// =============================================================================

#[derive(Debug, Clone)]
pub enum Field {
    Particles(ParticleField),
    Stars(StarField),
}

impl Field {
    fn build(kind: FieldSpec, viewport: Viewport, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        match kind {
            FieldSpec::Particles(config) => {
                let bounds = Bounds::for_viewport(viewport.width, viewport.height);
                Self::Particles(ParticleField::new(config, bounds, &mut rng))
            }
            FieldSpec::Stars(config) => Self::Stars(StarField::new(config, &mut rng)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Particles(f) => f.len(),
            Self::Stars(f) => f.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One frame of motion. Particles follow the pointer; stars drift on
    /// their own.
    fn step(&mut self, orientation: &mut Orientation, pointer: Pointer) {
        match self {
            Self::Particles(f) => {
                f.step();
                orientation.nudge(pointer);
            }
            Self::Stars(_) => StarField::drift(orientation),
        }
    }
}

// =============================================================================
// Frame
// =============================================================================

/// Read-only view of one tick, handed to the surface.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub field: &'a Field,
    pub orientation: Orientation,
    pub projection: &'a Projection,
    /// Seconds since the first tick.
    pub elapsed_s: f64,
}

/// A projected point ready to paint, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub alpha: f64,
}

impl Frame<'_> {
    /// Stars glow into each other; particles paint normally.
    #[must_use]
    pub fn additive(&self) -> bool {
        matches!(self.field, Field::Stars(_))
    }

    /// Project every visible point. Points outside the view are skipped.
    #[must_use]
    pub fn sprites(&self) -> Vec<Sprite> {
        match self.field {
            Field::Particles(field) => {
                let config = field.config();
                field
                    .particles()
                    .iter()
                    .filter_map(|p| {
                        let at = self.projection.project(self.orientation.apply(p.position))?;
                        Some(Sprite {
                            x: at.x,
                            y: at.y,
                            radius: (config.size * at.scale * 0.5).max(MIN_SPRITE_RADIUS_PX),
                            color: config.color,
                            alpha: config.opacity,
                        })
                    })
                    .collect()
            }
            Field::Stars(field) => field
                .stars()
                .iter()
                .filter_map(|star| {
                    let at = self.projection.project(self.orientation.apply(star.position))?;
                    Some(Sprite {
                        x: at.x,
                        y: at.y,
                        radius: (star.size * star.twinkle(self.elapsed_s) * 0.5).max(MIN_SPRITE_RADIUS_PX),
                        color: star.tint.rgb(),
                        alpha: 1.0,
                    })
                })
                .collect(),
        }
    }
}

// =============================================================================
// Loop
// =============================================================================

/// Outcome of [`BackgroundLoop::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    /// A second start while running; nothing was allocated.
    AlreadyRunning,
    /// No surface or no frame scheduling. Nothing is animating.
    Degraded,
}

struct Scene<S> {
    surface: S,
    field: Field,
    projection: Projection,
    orientation: Orientation,
    pointer: Pointer,
    parallax: Parallax,
    pending: Option<FrameHandle>,
    origin_ms: Option<f64>,
    ticks: u64,
}

impl<S: RenderSurface> Scene<S> {
    fn tick(&mut self, now_ms: f64) -> Result<(), SurfaceError> {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        self.field.step(&mut self.orientation, self.pointer);
        self.projection.camera_y = self.parallax.step();
        self.ticks += 1;
        let frame = Frame {
            field: &self.field,
            orientation: self.orientation,
            projection: &self.projection,
            elapsed_s: ((now_ms - origin) / 1000.0).max(0.0),
        };
        self.surface.draw(&frame)
    }
}

enum State<S> {
    Idle,
    Running(Box<Scene<S>>),
    Degraded,
    Stopped,
}

pub struct BackgroundLoop<H: Host> {
    host: H,
    state: State<H::Surface>,
}

impl<H: Host> BackgroundLoop<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self { host, state: State::Idle }
    }

    /// Allocate the field and surface and schedule the first frame.
    ///
    /// A second call while running changes nothing. Starting again after
    /// `stop` builds a fresh field.
    pub fn start(&mut self, config: &BackgroundConfig, viewport: Viewport) -> LoopStatus {
        if matches!(self.state, State::Running(_)) {
            log::warn!("background: start called while running; ignoring");
            return LoopStatus::AlreadyRunning;
        }

        let mut surface = match self.host.create_surface(viewport) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("background: no render surface, continuing without animation: {err}");
                self.state = State::Degraded;
                return LoopStatus::Degraded;
            }
        };

        let projection = Projection::new(viewport, config.lens);
        surface.resize(&projection);

        let Some(pending) = self.host.request_frame() else {
            log::warn!("background: frame scheduling unavailable, continuing without animation");
            surface.release();
            self.state = State::Degraded;
            return LoopStatus::Degraded;
        };

        let field = Field::build(config.field, viewport, config.seed);
        log::debug!("background: started with {} points", field.len());
        self.state = State::Running(Box::new(Scene {
            surface,
            field,
            projection,
            orientation: Orientation::default(),
            pointer: Pointer::default(),
            parallax: Parallax::default(),
            pending: Some(pending),
            origin_ms: None,
            ticks: 0,
        }));
        LoopStatus::Running
    }

    /// Frame callback. Returns whether a tick ran.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> bool {
        let State::Running(scene) = &mut self.state else {
            log::debug!("background: frame {handle:?} after stop; ignoring");
            return false;
        };
        if scene.pending != Some(handle) {
            log::debug!("background: stale frame {handle:?}; ignoring");
            return false;
        }
        scene.pending = None;

        if let Err(err) = scene.tick(now_ms) {
            log::warn!("background: draw failed, disabling animation: {err}");
            self.degrade();
            return false;
        }

        scene.pending = self.host.request_frame();
        if scene.pending.is_none() {
            log::warn!("background: frame scheduling lost, disabling animation");
            self.degrade();
        }
        true
    }

    /// Normalized pointer position in `[-1, 1]`; out-of-range input is
    /// clamped. Affects rotation only, never point positions.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let State::Running(scene) = &mut self.state {
            scene.pointer = Pointer::new(x, y);
        }
    }

    /// Re-fit the projection. The field is left untouched.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if let State::Running(scene) = &mut self.state {
            scene.projection.viewport = viewport;
            scene.surface.resize(&scene.projection);
        }
    }

    /// Page scroll position over its maximum, for camera parallax.
    pub fn on_scroll_ratio(&mut self, ratio: f64) {
        if let State::Running(scene) = &mut self.state {
            scene.parallax.set_ratio(ratio);
        }
    }

    /// Cancel the pending frame and release the surface. Safe to call in
    /// any state, any number of times.
    pub fn stop(&mut self) {
        if let State::Running(mut scene) = std::mem::replace(&mut self.state, State::Stopped) {
            if let Some(handle) = scene.pending.take() {
                self.host.cancel_frame(handle);
            }
            scene.surface.release();
            log::debug!("background: stopped after {} ticks", scene.ticks);
        }
    }

    fn degrade(&mut self) {
        self.stop();
        self.state = State::Degraded;
    }

    // --- Queries ---

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.state, State::Degraded)
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.state {
            State::Running(scene) => scene.pending,
            _ => None,
        }
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        match &self.state {
            State::Running(scene) => scene.ticks,
            _ => 0,
        }
    }

    #[must_use]
    pub fn field(&self) -> Option<&Field> {
        match &self.state {
            State::Running(scene) => Some(&scene.field),
            _ => None,
        }
    }

    #[must_use]
    pub fn projection(&self) -> Option<&Projection> {
        match &self.state {
            State::Running(scene) => Some(&scene.projection),
            _ => None,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        match &self.state {
            State::Running(scene) => Some(scene.orientation),
            _ => None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host> Drop for BackgroundLoop<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
