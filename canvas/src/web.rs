//! Browser host binding.
//!
//! This module is the only place that touches [`web_sys`]. It implements
//! [`Surface`] for `CanvasRenderingContext2d` and exports [`TrilatView`] to
//! JavaScript. The host page owns the poll timer and the resize listener and
//! forwards both here; nothing in this module schedules work on its own.

use std::f64::consts::TAU;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{CanvasSize, Point};
use crate::doc::Snapshot;
use crate::engine::{Engine, UpdateOutcome};
use crate::surface::{Stroke, Surface, TextStyle};

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn resize(&mut self, size: CanvasSize) -> Result<(), Self::Error> {
        let canvas = self
            .canvas()
            .ok_or_else(|| js_error("2d context is not attached to a canvas"))?;
        canvas.set_width(size.width());
        canvas.set_height(size.height());
        Ok(())
    }

    fn clear(&mut self, color: &'static str) -> Result<(), Self::Error> {
        let canvas = self
            .canvas()
            .ok_or_else(|| js_error("2d context is not attached to a canvas"))?;
        self.set_fill_style_str(color);
        self.fill_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error> {
        self.set_stroke_style_str(stroke.color);
        self.set_line_width(stroke.width);
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Self::Error> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.set_stroke_style_str(stroke.color);
        self.set_line_width(stroke.width);
        self.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &'static str) -> Result<(), Self::Error> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.set_fill_style_str(color);
        self.fill();
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), Self::Error> {
        self.set_font(style.font.css());
        self.set_text_align(style.align.css());
        self.set_fill_style_str(style.color);
        self.fill_text(text, at.x, at.y)
    }
}

/// Live trilateration view bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct TrilatView {
    canvas: HtmlCanvasElement,
    engine: Engine<CanvasRenderingContext2d>,
}

#[wasm_bindgen]
impl TrilatView {
    /// Bind to `canvas`, size it from its parent element and draw the empty
    /// scene.
    ///
    /// # Errors
    ///
    /// Fails if the element has no 2d context or the first draw fails.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<TrilatView, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let engine = Engine::new(ctx, container_width(&canvas))?;
        Ok(Self { canvas, engine })
    }

    /// Replace the view with the snapshot in `body` and redraw.
    ///
    /// # Errors
    ///
    /// Fails if `body` does not decode; the previous frame stays on screen.
    pub fn update(&mut self, body: &str) -> Result<(), JsValue> {
        let snapshot = decode(body)?;
        self.engine.update(snapshot)
    }

    /// Apply the snapshot in `body` only if `seq` is newer than the last one
    /// applied. Returns `true` when the view changed.
    ///
    /// # Errors
    ///
    /// Fails if `body` does not decode; the previous frame stays on screen.
    pub fn apply(&mut self, seq: u32, body: &str) -> Result<bool, JsValue> {
        let snapshot = decode(body)?;
        let outcome = self.engine.apply(u64::from(seq), snapshot)?;
        Ok(outcome == UpdateOutcome::Applied)
    }

    /// Re-read the parent element's width and redraw the held state.
    ///
    /// # Errors
    ///
    /// Fails if the redraw fails.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self) -> Result<(), JsValue> {
        self.engine.on_resize(container_width(&self.canvas))
    }

    /// Whether any scanner or target is currently shown.
    #[wasm_bindgen(js_name = hasData)]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.engine.core.has_data()
    }
}

fn decode(body: &str) -> Result<Snapshot, JsValue> {
    Snapshot::from_json(body).map_err(|e| {
        warn!("snapshot decode failed: {e}");
        js_error(&e.to_string())
    })
}

/// Width of the canvas's parent element, or of the canvas itself when
/// detached.
fn container_width(canvas: &HtmlCanvasElement) -> f64 {
    match canvas.parent_element() {
        Some(parent) => parent.get_bounding_client_rect().width(),
        None => canvas.get_bounding_client_rect().width(),
    }
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
