#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

// =============================================================================
// Scripted host
// =============================================================================

#[derive(Debug, Default)]
struct Log {
    surfaces: usize,
    requested: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    resized: Vec<Projection>,
    draws: Vec<usize>,
    released: usize,
}

struct MockSurface {
    log: Rc<RefCell<Log>>,
    fail_on_draw: Option<usize>,
}

impl RenderSurface for MockSurface {
    fn resize(&mut self, projection: &Projection) {
        self.log.borrow_mut().resized.push(*projection);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        let mut log = self.log.borrow_mut();
        if self.fail_on_draw == Some(log.draws.len()) {
            return Err(SurfaceError::Backend("lost context".into()));
        }
        log.draws.push(frame.field.len());
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}

#[derive(Default)]
struct MockHost {
    log: Rc<RefCell<Log>>,
    next: i32,
    no_surface: bool,
    no_scheduler_after: Option<usize>,
    fail_on_draw: Option<usize>,
}

impl Host for MockHost {
    type Surface = MockSurface;

    fn create_surface(&mut self, _viewport: Viewport) -> Result<MockSurface, SurfaceError> {
        if self.no_surface {
            return Err(SurfaceError::NoContainer);
        }
        self.log.borrow_mut().surfaces += 1;
        Ok(MockSurface { log: Rc::clone(&self.log), fail_on_draw: self.fail_on_draw })
    }
}

impl Scheduler for MockHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let mut log = self.log.borrow_mut();
        if self.no_scheduler_after.is_some_and(|n| log.requested.len() >= n) {
            return None;
        }
        self.next += 1;
        let handle = FrameHandle(self.next);
        log.requested.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.log.borrow_mut().cancelled.push(handle);
    }
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

fn particles(count: usize, speed: f64) -> BackgroundConfig {
    BackgroundConfig::particles(ParticleConfig { count, speed, ..ParticleConfig::default() }, 7)
}

fn started(host: MockHost, config: &BackgroundConfig) -> (BackgroundLoop<MockHost>, Rc<RefCell<Log>>) {
    let log = Rc::clone(&host.log);
    let mut bg = BackgroundLoop::new(host);
    assert_eq!(bg.start(config, viewport()), LoopStatus::Running);
    (bg, log)
}

/// Fire the pending frame `n` times.
fn run(bg: &mut BackgroundLoop<MockHost>, n: usize) {
    for i in 0..n {
        let handle = bg.pending_frame().expect("frame pending");
        assert!(bg.on_frame(handle, i as f64 * 16.0));
    }
}

fn positions(bg: &BackgroundLoop<MockHost>) -> Vec<crate::particles::Particle> {
    match bg.field() {
        Some(Field::Particles(f)) => f.particles().to_vec(),
        _ => panic!("expected a particle field"),
    }
}

// =============================================================================
// Start
// =============================================================================

#[test]
fn start_allocates_and_schedules_one_frame() {
    let (bg, log) = started(MockHost::default(), &particles(40, 1.0));
    assert!(bg.is_running());
    assert_eq!(bg.field().map(Field::len), Some(40));
    let log = log.borrow();
    assert_eq!(log.surfaces, 1);
    assert_eq!(log.requested, vec![FrameHandle(1)]);
    assert_eq!(log.resized.len(), 1);
    assert_eq!(bg.pending_frame(), Some(FrameHandle(1)));
}

#[test]
fn second_start_allocates_nothing() {
    let (mut bg, log) = started(MockHost::default(), &particles(10, 1.0));
    assert_eq!(bg.start(&particles(10, 1.0), viewport()), LoopStatus::AlreadyRunning);
    assert_eq!(log.borrow().surfaces, 1);
    assert_eq!(log.borrow().requested.len(), 1);
}

#[test]
fn missing_surface_degrades_quietly() {
    let host = MockHost { no_surface: true, ..MockHost::default() };
    let log = Rc::clone(&host.log);
    let mut bg = BackgroundLoop::new(host);
    assert_eq!(bg.start(&particles(10, 1.0), viewport()), LoopStatus::Degraded);
    assert!(bg.is_degraded());
    assert!(bg.pending_frame().is_none());
    assert!(log.borrow().requested.is_empty());
    bg.stop();
    assert_eq!(log.borrow().released, 0);
}

#[test]
fn missing_scheduler_releases_surface() {
    let host = MockHost { no_scheduler_after: Some(0), ..MockHost::default() };
    let log = Rc::clone(&host.log);
    let mut bg = BackgroundLoop::new(host);
    assert_eq!(bg.start(&particles(10, 1.0), viewport()), LoopStatus::Degraded);
    assert_eq!(log.borrow().released, 1);
}

// =============================================================================
// Ticks
// =============================================================================

#[test]
fn each_frame_updates_then_draws_whole_field() {
    let (mut bg, log) = started(MockHost::default(), &particles(25, 2.0));
    let before = positions(&bg);
    run(&mut bg, 3);
    assert_eq!(bg.ticks(), 3);
    assert_eq!(log.borrow().draws, vec![25, 25, 25]);
    assert_ne!(positions(&bg), before);
    // One outstanding request at a time.
    assert_eq!(log.borrow().requested.len(), 4);
    assert_eq!(bg.pending_frame(), Some(FrameHandle(4)));
}

#[test]
fn stale_handle_is_ignored() {
    let (mut bg, log) = started(MockHost::default(), &particles(5, 1.0));
    run(&mut bg, 1);
    assert!(!bg.on_frame(FrameHandle(1), 100.0));
    assert_eq!(bg.ticks(), 1);
    assert_eq!(log.borrow().draws.len(), 1);
}

#[test]
fn draw_failure_degrades_and_stops_scheduling() {
    let host = MockHost { fail_on_draw: Some(2), ..MockHost::default() };
    let (mut bg, log) = started(host, &particles(5, 1.0));
    run(&mut bg, 2);
    let handle = bg.pending_frame().expect("pending");
    assert!(!bg.on_frame(handle, 50.0));
    assert!(bg.is_degraded());
    assert!(bg.pending_frame().is_none());
    let log = log.borrow();
    assert_eq!(log.released, 1);
    assert_eq!(log.requested.len(), 3);
}

#[test]
fn lost_scheduler_mid_run_degrades() {
    let host = MockHost { no_scheduler_after: Some(2), ..MockHost::default() };
    let (mut bg, log) = started(host, &particles(5, 1.0));
    run(&mut bg, 2);
    assert!(bg.is_degraded());
    assert_eq!(log.borrow().released, 1);
}

// =============================================================================
// Inputs
// =============================================================================

#[test]
fn resize_keeps_field_and_refits_projection() {
    let (mut bg, log) = started(MockHost::default(), &particles(30, 1.0));
    run(&mut bg, 5);
    let before = positions(&bg);
    bg.on_resize(Viewport::new(400.0, 400.0, 2.0));
    assert_eq!(positions(&bg), before);
    let projection = bg.projection().expect("running");
    assert_eq!(projection.aspect(), 1.0);
    assert_eq!(projection.viewport.pixel_ratio, 2.0);
    assert_eq!(log.borrow().resized.last().map(Projection::aspect), Some(1.0));
}

#[test]
fn pointer_rotates_without_moving_points() {
    let (mut bg, _log) = started(MockHost::default(), &particles(30, 0.0));
    let before = positions(&bg);
    bg.on_pointer_move(1.0, -1.0);
    run(&mut bg, 10);
    assert_eq!(positions(&bg), before);
    let o = bg.orientation().expect("running");
    assert!(o.y > 0.0);
    assert!(o.x > 0.0, "negative pitch wraps into [0, TAU)");
}

#[test]
fn pointer_input_is_clamped() {
    let (mut bg, _log) = started(MockHost::default(), &particles(1, 0.0));
    bg.on_pointer_move(5.0, 0.0);
    run(&mut bg, 1);
    let o = bg.orientation().expect("running");
    assert!((o.y - crate::consts::POINTER_ROTATION_GAIN).abs() < 1e-12);
}

#[test]
fn stars_drift_without_pointer() {
    let config = BackgroundConfig::stars(StarConfig { count: 50, ..StarConfig::default() }, 3);
    let (mut bg, log) = started(MockHost::default(), &config);
    run(&mut bg, 4);
    let o = bg.orientation().expect("running");
    assert!(o.x > 0.0 && o.y > o.x);
    assert_eq!(log.borrow().draws, vec![50; 4]);
}

#[test]
fn scroll_pulls_camera_down() {
    let config = BackgroundConfig::stars(StarConfig { count: 1, ..StarConfig::default() }, 3);
    let (mut bg, _log) = started(MockHost::default(), &config);
    bg.on_scroll_ratio(1.0);
    run(&mut bg, 3);
    assert!(bg.projection().expect("running").camera_y < 0.0);
}

// =============================================================================
// Stop
// =============================================================================

#[test]
fn stop_before_start_is_safe() {
    let mut bg = BackgroundLoop::new(MockHost::default());
    bg.stop();
    bg.stop();
    assert!(!bg.is_running());
    assert!(bg.host().log.borrow().cancelled.is_empty());
}

#[test]
fn stop_cancels_pending_and_releases_once() {
    let (mut bg, log) = started(MockHost::default(), &particles(5, 1.0));
    run(&mut bg, 2);
    bg.stop();
    bg.stop();
    let log = log.borrow();
    assert_eq!(log.cancelled, vec![FrameHandle(3)]);
    assert_eq!(log.released, 1);
}

#[test]
fn no_tick_after_stop() {
    let (mut bg, log) = started(MockHost::default(), &particles(5, 1.0));
    let handle = bg.pending_frame().expect("pending");
    bg.stop();
    assert!(!bg.on_frame(handle, 16.0));
    assert!(log.borrow().draws.is_empty());
    assert!(bg.pending_frame().is_none());
}

#[test]
fn drop_stops_the_loop() {
    let (bg, log) = started(MockHost::default(), &particles(5, 1.0));
    drop(bg);
    assert_eq!(log.borrow().released, 1);
    assert_eq!(log.borrow().cancelled.len(), 1);
}

#[test]
fn restart_after_stop_builds_fresh_field() {
    let (mut bg, log) = started(MockHost::default(), &particles(5, 1.0));
    bg.stop();
    assert_eq!(bg.start(&particles(8, 1.0), viewport()), LoopStatus::Running);
    assert_eq!(bg.field().map(Field::len), Some(8));
    assert_eq!(log.borrow().surfaces, 2);
}

// =============================================================================
// Frame
// =============================================================================

#[test]
fn centred_particle_projects_to_viewport_centre() {
    let config = ParticleConfig { count: 1, speed: 0.0, ..ParticleConfig::default() };
    let field = ParticleField::new(config, Bounds::for_viewport(0.0, 0.0), &mut SmallRng::seed_from_u64(1));
    let field = Field::Particles(field);
    let projection = Projection::new(viewport(), Lens::default());
    let frame = Frame { field: &field, orientation: Orientation::default(), projection: &projection, elapsed_s: 0.0 };
    let sprites = frame.sprites();
    assert_eq!(sprites.len(), 1);
    assert!((sprites[0].x - 400.0).abs() < 1e-9);
    assert!((sprites[0].y - 300.0).abs() < 1e-9);
    assert_eq!(sprites[0].alpha, 0.6);
    assert!(!frame.additive());
}

#[test]
fn star_frames_are_additive() {
    let field = Field::Stars(StarField::new(StarConfig { count: 200, ..StarConfig::default() }, &mut SmallRng::seed_from_u64(2)));
    let projection = Projection::new(viewport(), StarConfig::lens());
    let frame = Frame { field: &field, orientation: Orientation::default(), projection: &projection, elapsed_s: 1.0 };
    assert!(frame.additive());
    let sprites = frame.sprites();
    // Stars behind the camera are culled.
    assert!(!sprites.is_empty() && sprites.len() < 200);
    assert!(sprites.iter().all(|s| s.radius >= MIN_SPRITE_RADIUS_PX));
}
