//! Browser bindings.
//!
//! DESIGN
//! ======
//! Each exported type owns everything it registers with the browser: its
//! animation-frame closure, its event listeners, and the elements or canvas
//! it paints. Nothing is discovered through global lookups; the page hands
//! in the elements at construction.
//!
//! The frame closure lives in a shared holder so the host can re-request it
//! from inside the callback. That holder forms an `Rc` cycle with the state
//! the closure captures; `stop`/`destroy` (and `Drop`) break it by taking the
//! closure out. Listeners deregister themselves on drop.
//!
//! ERROR HANDLING
//! ==============
//! Constructors reject malformed configuration with a JS error. Everything
//! after construction is decoration: browser failures are logged and the
//! component stops animating instead of throwing.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use site::content::NavLink;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, MouseEvent, Window};

use crate::background::{BackgroundConfig, BackgroundLoop, FrameHandle, Host, LoopStatus, Scheduler, SurfaceError};
use crate::camera::{Pointer, Viewport};
use crate::consts::ITEM_RISE_PX;
use crate::menu::{MenuConfig, MenuController};
use crate::menu_driver::MenuDriver;
use crate::particles::ParticleConfig;
use crate::render::CanvasSurface;
use crate::starfield::StarConfig;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Class applied to the navbar header once the page has scrolled.
const ELEVATED_CLASS: &str = "glass-effect";

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logging already initialized");
    }
}

// =============================================================================
// Shared plumbing
// =============================================================================

/// An event listener that removes itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self.target.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref()) {
            log::warn!("web: failed to remove {} listener: {err:?}", self.event);
        }
    }
}

fn keep_listener(listeners: &mut Vec<Listener>, result: Result<Listener, JsValue>) {
    match result {
        Ok(listener) => listeners.push(listener),
        Err(err) => log::warn!("web: failed to add listener: {err:?}"),
    }
}

fn request_frame(window: &Window, holder: &FrameCallback) -> Option<i32> {
    let callback = holder.borrow();
    let callback = callback.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("web: requestAnimationFrame failed: {err:?}");
            None
        }
    }
}

fn cancel_frame(window: &Window, id: i32) {
    if let Err(err) = window.cancel_animation_frame(id) {
        log::warn!("web: cancelAnimationFrame failed: {err:?}");
    }
}

fn js_number(value: Result<JsValue, JsValue>) -> f64 {
    value.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

fn scroll_ratio(window: &Window) -> f64 {
    let offset = window.scroll_y().unwrap_or(0.0);
    let page = window.document().and_then(|d| d.body()).map_or(0.0, |b| f64::from(b.scroll_height()));
    let max = page - js_number(window.inner_height());
    if max > 0.0 { offset / max } else { 0.0 }
}

fn seed() -> u64 {
    js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits()
}

fn elements(list: &Array, what: &str) -> Result<Vec<HtmlElement>, JsValue> {
    list.iter()
        .map(|v| v.dyn_into::<HtmlElement>().map_err(|_| JsValue::from_str(&format!("{what}: expected HTML elements"))))
        .collect()
}

// =============================================================================
// Background host
// =============================================================================

/// `requestAnimationFrame` against one shared frame closure.
pub struct WebScheduler {
    window: Window,
    frame: FrameCallback,
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        request_frame(&self.window, &self.frame).map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        cancel_frame(&self.window, handle.0);
    }
}

/// Frame scheduler and surface factory backed by the browser.
pub struct WebHost {
    container: Element,
    scheduler: WebScheduler,
}

impl Scheduler for WebHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.scheduler.request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.scheduler.cancel_frame(handle);
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn create_surface(&mut self, viewport: Viewport) -> Result<CanvasSurface, SurfaceError> {
        if !self.container.is_connected() {
            return Err(SurfaceError::NoContainer);
        }
        CanvasSurface::attach(&self.container, viewport)
    }
}

/// How a background measures its viewport.
#[derive(Debug, Clone, Copy)]
enum Sizing {
    Container,
    Window,
}

fn measure(window: &Window, container: &HtmlElement, sizing: Sizing) -> Viewport {
    let dpr = window.device_pixel_ratio();
    match sizing {
        Sizing::Container => {
            Viewport::new(f64::from(container.client_width()), f64::from(container.client_height()), dpr)
        }
        Sizing::Window => Viewport::new(js_number(window.inner_width()), js_number(window.inner_height()), dpr),
    }
}

/// A started background plus everything it registered.
struct BackgroundMount {
    bg: Option<Rc<RefCell<BackgroundLoop<WebHost>>>>,
    frame: FrameCallback,
    listeners: Vec<Listener>,
}

impl BackgroundMount {
    fn start(container: &HtmlElement, config: &BackgroundConfig, sizing: Sizing, follow_pointer: bool, follow_scroll: bool) -> Self {
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let mut mount = Self { bg: None, frame: Rc::clone(&frame), listeners: Vec::new() };
        let Some(window) = web_sys::window() else {
            log::warn!("background: no window, continuing without animation");
            return mount;
        };

        let scheduler = WebScheduler { window: window.clone(), frame: Rc::clone(&frame) };
        let host = WebHost { container: container.clone().into(), scheduler };
        let bg = Rc::new(RefCell::new(BackgroundLoop::new(host)));
        let bg_for_frame = Rc::clone(&bg);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            let mut bg = bg_for_frame.borrow_mut();
            if let Some(handle) = bg.pending_frame() {
                bg.on_frame(handle, now);
            }
        }) as Box<dyn FnMut(f64)>));

        let status = bg.borrow_mut().start(config, measure(&window, container, sizing));
        mount.bg = Some(Rc::clone(&bg));
        if status != LoopStatus::Running {
            mount.stop();
            return mount;
        }

        let resize = {
            let (bg, win, container) = (Rc::clone(&bg), window.clone(), container.clone());
            Listener::add(&window, "resize", move |_| {
                bg.borrow_mut().on_resize(measure(&win, &container, sizing));
            })
        };
        keep_listener(&mut mount.listeners, resize);

        if follow_pointer {
            let bg = Rc::clone(&bg);
            let pointer = Listener::add(container, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut bg = bg.borrow_mut();
                if let Some(viewport) = bg.projection().map(|p| p.viewport) {
                    let p = Pointer::from_client(f64::from(event.client_x()), f64::from(event.client_y()), &viewport);
                    bg.on_pointer_move(p.x, p.y);
                }
            });
            keep_listener(&mut mount.listeners, pointer);
        }

        if follow_scroll {
            let (bg, win) = (Rc::clone(&bg), window.clone());
            let scroll = Listener::add(&window, "scroll", move |_| {
                bg.borrow_mut().on_scroll_ratio(scroll_ratio(&win));
            });
            keep_listener(&mut mount.listeners, scroll);
        }

        mount
    }

    fn is_running(&self) -> bool {
        self.bg.as_ref().is_some_and(|bg| bg.borrow().is_running())
    }

    fn stop(&mut self) {
        self.listeners.clear();
        if let Some(bg) = self.bg.take() {
            bg.borrow_mut().stop();
        }
        self.frame.borrow_mut().take();
    }
}

impl Drop for BackgroundMount {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Bouncing particle field that turns with the pointer.
#[wasm_bindgen]
pub struct ParticleBackground {
    mount: BackgroundMount,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Start animating inside `container`.
    ///
    /// # Errors
    ///
    /// Rejects an invalid color, size, or speed.
    #[wasm_bindgen(constructor)]
    pub fn new(container: &HtmlElement, count: u32, color: &str, size: f64, speed: f64) -> Result<ParticleBackground, JsValue> {
        let config = ParticleConfig::parse(count as usize, color, size, speed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = BackgroundConfig::particles(config, seed());
        Ok(ParticleBackground { mount: BackgroundMount::start(container, &config, Sizing::Container, true, false) })
    }

    /// Cancel the frame loop, remove listeners, and drop the canvas.
    pub fn stop(&mut self) {
        self.mount.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mount.is_running()
    }
}

/// Slowly turning star sphere with scroll parallax.
#[wasm_bindgen]
pub struct StarryBackground {
    mount: BackgroundMount,
}

#[wasm_bindgen]
impl StarryBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(container: &HtmlElement, count: u32) -> StarryBackground {
        let config = BackgroundConfig::stars(StarConfig { count: count as usize, ..StarConfig::default() }, seed());
        StarryBackground { mount: BackgroundMount::start(container, &config, Sizing::Window, false, true) }
    }

    pub fn stop(&mut self) {
        self.mount.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mount.is_running()
    }
}

// =============================================================================
// Navigation menu
// =============================================================================

/// The driven controller plus the elements it paints.
struct MenuView {
    driver: MenuDriver<WebScheduler>,
    header: HtmlElement,
    container: HtmlElement,
    bars: Vec<HtmlElement>,
    items: Vec<HtmlElement>,
    socials: Vec<HtmlElement>,
}

impl MenuView {
    fn paint(&self) -> Result<(), JsValue> {
        let controller = self.driver.controller();
        let frame = controller.frame();
        let state = controller.state();

        let style = self.container.style();
        style.set_property("height", &format!("{}px", frame.container_height_px))?;
        style.set_property("border-radius", &format!("{}px", frame.corner_radius_px))?;
        style.set_property("pointer-events", if state.is_open { "auto" } else { "none" })?;

        let icon = frame.icon;
        let transforms = [
            format!("translateY({}px) rotate({}deg)", icon.top_offset_px, icon.top_rotation_deg),
            String::new(),
            format!("translateY({}px) rotate({}deg)", icon.bottom_offset_px, icon.bottom_rotation_deg),
        ];
        for (bar, transform) in self.bars.iter().zip(&transforms) {
            bar.style().set_property("transform", transform)?;
        }
        if let Some(middle) = self.bars.get(1) {
            middle.style().set_property("opacity", &icon.middle_opacity.to_string())?;
        }

        for (item, reveal) in self.items.iter().zip(&frame.items) {
            let style = item.style();
            style.set_property("opacity", &reveal.clamp(0.0, 1.0).to_string())?;
            style.set_property("transform", &format!("translateY({}px)", (1.0 - reveal) * ITEM_RISE_PX))?;
        }
        for (social, reveal) in self.socials.iter().zip(&frame.socials) {
            let style = social.style();
            style.set_property("opacity", &reveal.clamp(0.0, 1.0).to_string())?;
            style.set_property("transform", &format!("scale({})", reveal.max(0.0)))?;
        }
        Ok(())
    }

    fn paint_or_log(&self) {
        if let Err(err) = self.paint() {
            log::warn!("menu: paint failed: {err:?}");
        }
    }
}

/// Mobile navigation menu: a pill that expands to full height, a three-bar
/// icon that morphs into an X, and staggered item entrances.
#[wasm_bindgen]
pub struct NavMenu {
    view: Rc<RefCell<MenuView>>,
    frame: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl NavMenu {
    /// `bars` must hold exactly the top, middle, and bottom icon bars.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window or when the element lists are
    /// malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(header: HtmlElement, container: HtmlElement, bars: &Array, items: &Array, socials: &Array) -> Result<NavMenu, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("NavMenu requires a window"))?;
        let bars = elements(bars, "bars")?;
        if bars.len() != 3 {
            return Err(JsValue::from_str("bars: expected top, middle, and bottom"));
        }
        let items = elements(items, "items")?;
        let socials = elements(socials, "socials")?;

        let mut controller =
            MenuController::new(MenuConfig { item_count: items.len(), social_count: socials.len(), ..MenuConfig::default() });
        controller.set_viewport_height(js_number(window.inner_height()));
        controller.on_scroll(window.scroll_y().unwrap_or(0.0));

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = WebScheduler { window: window.clone(), frame: Rc::clone(&frame) };
        let view = MenuView { driver: MenuDriver::new(controller, scheduler), header, container, bars, items, socials };
        view.paint_or_log();
        let view = Rc::new(RefCell::new(view));

        let view_for_frame = Rc::clone(&view);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            let mut view = view_for_frame.borrow_mut();
            if let Some(handle) = view.driver.pending_frame() {
                if view.driver.on_frame(handle, now) {
                    view.paint_or_log();
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let mut listeners = Vec::new();
        let scroll = {
            let (view, win) = (Rc::clone(&view), window.clone());
            Listener::add(&window, "scroll", move |_| {
                let mut view = view.borrow_mut();
                let elevated = view.driver.on_scroll(win.scroll_y().unwrap_or(0.0));
                if let Err(err) = view.header.class_list().toggle_with_force(ELEVATED_CLASS, elevated) {
                    log::warn!("menu: class toggle failed: {err:?}");
                }
            })
        };
        keep_listener(&mut listeners, scroll);
        let resize = {
            let (view, win) = (Rc::clone(&view), window.clone());
            Listener::add(&window, "resize", move |_| {
                let mut view = view.borrow_mut();
                view.driver.set_viewport_height(js_number(win.inner_height()));
                view.paint_or_log();
            })
        };
        keep_listener(&mut listeners, resize);

        Ok(NavMenu { view, frame, listeners })
    }

    /// Open if closed, close if open. An animation in flight turns around.
    /// Does nothing after `destroy`.
    pub fn toggle(&self) {
        let mut view = self.view.borrow_mut();
        if view.driver.toggle().is_some() {
            view.paint_or_log();
        }
    }

    /// Close the menu for navigation to `href`. Returns the canonical
    /// route, or `undefined` for an unknown link or a destroyed menu.
    #[wasm_bindgen(js_name = selectLink)]
    pub fn select_link(&self, href: &str) -> Option<String> {
        let Some(link) = NavLink::from_href(href) else {
            log::warn!("menu: unknown link {href}");
            return None;
        };
        let mut view = self.view.borrow_mut();
        let navigation = view.driver.select_link(link)?;
        view.paint_or_log();
        Some(navigation.link.href().to_string())
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.view.borrow().driver.controller().state().is_open
    }

    #[wasm_bindgen(getter, js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.view.borrow().driver.controller().state().is_animating
    }

    #[wasm_bindgen(getter, js_name = scrollElevated)]
    pub fn scroll_elevated(&self) -> bool {
        self.view.borrow().driver.controller().state().scroll_elevated
    }

    /// Stop animating and deregister everything. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.view.borrow_mut().driver.destroy();
        self.frame.borrow_mut().take();
    }
}

impl Drop for NavMenu {
    fn drop(&mut self) {
        self.destroy();
    }
}
