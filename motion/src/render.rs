//! Rendering: paints background frames onto a 2D canvas.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`Frame`] and produces pixels; it never mutates
//! simulation state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! [`CanvasSurface::draw`] converts them into [`SurfaceError`] for the loop.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::background::{Frame, RenderSurface, SurfaceError, Sprite};
use crate::camera::{Projection, Viewport};

/// A canvas element appended to a host container, sized to cover it.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    released: bool,
}

impl CanvasSurface {
    /// Create the canvas and its 2D context and append it to `container`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the container is detached or the browser
    /// refuses a 2D context.
    pub fn attach(container: &Element, viewport: Viewport) -> Result<Self, SurfaceError> {
        let document = container.owner_document().ok_or(SurfaceError::NoContainer)?;
        let canvas = document
            .create_element("canvas")
            .map_err(backend)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(backend)?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;

        canvas.set_attribute("aria-hidden", "true").map_err(backend)?;
        let style = canvas.style();
        for (prop, value) in [("position", "absolute"), ("inset", "0"), ("pointer-events", "none")] {
            style.set_property(prop, value).map_err(backend)?;
        }
        container.append_child(&canvas).map_err(backend)?;

        let surface = Self { canvas, ctx, viewport, released: false };
        surface.apply_size().map_err(backend)?;
        Ok(surface)
    }

    fn apply_size(&self) -> Result<(), JsValue> {
        let (w, h) = self.viewport.device_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", self.viewport.width))?;
        style.set_property("height", &format!("{}px", self.viewport.height))
    }
}

impl RenderSurface for CanvasSurface {
    fn resize(&mut self, projection: &Projection) {
        self.viewport = projection.viewport;
        if let Err(err) = self.apply_size() {
            log::warn!("render: canvas resize failed: {err:?}");
        }
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::NoContainer);
        }
        draw(&self.ctx, frame, &self.viewport).map_err(backend)
    }

    fn release(&mut self) {
        if !self.released {
            self.canvas.remove();
            self.released = true;
        }
    }
}

/// Clear the canvas and paint every visible point of `frame`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, viewport: &Viewport) -> Result<(), JsValue> {
    let dpr = viewport.pixel_ratio;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.set_global_composite_operation(if frame.additive() { "lighter" } else { "source-over" })?;

    for sprite in frame.sprites() {
        draw_sprite(ctx, &sprite)?;
    }

    ctx.set_global_alpha(1.0);
    Ok(())
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &Sprite) -> Result<(), JsValue> {
    ctx.set_global_alpha(sprite.alpha);
    ctx.set_fill_style_str(&sprite.color.css(1.0));
    ctx.begin_path();
    ctx.arc(sprite.x, sprite.y, sprite.radius, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

fn backend(err: JsValue) -> SurfaceError {
    SurfaceError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
