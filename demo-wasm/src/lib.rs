//! Browser host for the neonfx overlay.
//!
//! JS owns the event listeners and the single `requestAnimationFrame` loop;
//! it forwards pointer, resize and frame callbacks to [`NeonOverlay`]. Layers
//! are fixed-position canvases (and one element for the cursor marker)
//! appended to `document.body` with pointer events disabled.

use neonfx::{
    Color, CursorConfig, CursorOptions, Layer, Marker, MarkerTransform, Overlay, Paint,
    ParticleConfig, ParticleOptions, RippleConfig, RippleOptions, Surface, Vec2,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

// ---- Logging ----

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[neonfx] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Raise console verbosity: "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => log::warn!("unknown log level {:?}", level),
    }
}

// ---- Canvas surface ----

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn pin_to_viewport(element: &HtmlElement) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "0")?;
    style.set_property("left", "0")?;
    style.set_property("pointer-events", "none")?;
    Ok(())
}

fn css_color(color: Color) -> String {
    color.to_string()
}

/// A full-viewport 2D canvas layer.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Create the canvas and append it to the body.
    pub fn create() -> Result<CanvasSurface, JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("No document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("No body"))?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("No 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        pin_to_viewport(&canvas)?;
        body.append_child(&canvas)?;
        Ok(CanvasSurface { canvas, ctx })
    }

    fn apply(&self, paint: &Paint) {
        let color = css_color(paint.color);
        self.ctx.set_global_alpha(f64::from(paint.alpha));
        self.ctx.set_fill_style_str(&color);
        self.ctx.set_stroke_style_str(&color);
        self.ctx.set_line_width(f64::from(paint.line_width));
        self.ctx.set_shadow_blur(f64::from(paint.glow));
        self.ctx.set_shadow_color(&color);
    }

    fn circle_path(&self, center: Vec2<f32>, radius: f32) -> bool {
        self.ctx.begin_path();
        let traced = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius.max(0.0)),
            0.0,
            std::f64::consts::TAU,
        );
        if let Err(err) = traced {
            log::warn!("arc failed: {:?}", err);
            return false;
        }
        true
    }
}

impl Layer for CanvasSurface {
    fn detach(&mut self) {
        self.canvas.remove();
    }

    fn set_z_index(&mut self, z_index: i32) {
        if let Err(err) = self.canvas.style().set_property("z-index", &z_index.to_string()) {
            log::warn!("could not set z-index: {:?}", err);
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.clear_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint) {
        self.apply(paint);
        if self.circle_path(center, radius) {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint) {
        self.apply(paint);
        if self.circle_path(center, radius) {
            self.ctx.stroke();
        }
    }

    fn draw_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, paint: &Paint) {
        self.apply(paint);
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }
}

// ---- Cursor marker ----

/// A fixed-position element moved with a CSS transform.
pub struct DomMarker {
    element: HtmlElement,
}

impl DomMarker {
    /// Create a small glowing marker element and append it to the body.
    pub fn create(color: Color) -> Result<DomMarker, JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("No document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("No body"))?;
        let element = document.create_element("div")?.dyn_into::<HtmlElement>()?;

        pin_to_viewport(&element)?;
        let style = element.style();
        let color = css_color(color);
        style.set_property("width", "20px")?;
        style.set_property("height", "20px")?;
        style.set_property("margin", "-10px 0 0 -10px")?;
        style.set_property("border", &format!("2px solid {}", color))?;
        style.set_property("box-shadow", &format!("0 0 10px {}", color))?;
        style.set_property("clip-path", "polygon(50% 0, 100% 100%, 50% 75%, 0 100%)")?;
        style.set_property("will-change", "transform")?;
        body.append_child(&element)?;
        Ok(DomMarker { element })
    }
}

/// CSS transform for a marker frame.
pub fn css_transform(t: &MarkerTransform) -> String {
    format!(
        "translate3d({:.2}px, {:.2}px, 0) rotate({:.2}deg) scale({:.3})",
        t.x, t.y, t.rotation, t.scale
    )
}

impl Layer for DomMarker {
    fn detach(&mut self) {
        self.element.remove();
    }

    fn set_z_index(&mut self, z_index: i32) {
        if let Err(err) = self.element.style().set_property("z-index", &z_index.to_string()) {
            log::warn!("could not set z-index: {:?}", err);
        }
    }
}

impl Marker for DomMarker {
    fn apply(&mut self, transform: &MarkerTransform) {
        let style = self.element.style();
        let result = style
            .set_property("transform", &css_transform(transform))
            .and_then(|()| style.set_property("filter", if transform.pressed { "brightness(1.6)" } else { "none" }));
        if let Err(err) = result {
            log::warn!("marker update failed: {:?}", err);
        }
    }
}

// ---- Overlay ----

fn options<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn js_error(err: neonfx::EffectError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn surface_or_log(layer: &str) -> Option<CanvasSurface> {
    CanvasSurface::create()
        .inspect_err(|err| log::error!("{} canvas unavailable: {:?}", layer, err))
        .ok()
}

/// All overlay effects of one page.
#[wasm_bindgen]
pub struct NeonOverlay {
    overlay: Overlay<f32, CanvasSurface, DomMarker>,
}

#[wasm_bindgen]
impl NeonOverlay {
    /// Mount every effect. Each argument is a (possibly empty) options
    /// object with camelCase keys; `undefined` means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        particles: JsValue,
        ripples: JsValue,
        cursor: JsValue,
    ) -> Result<NeonOverlay, JsValue> {
        let particle_config: ParticleConfig = if particles.is_undefined() { ParticleConfig::default() } else { options(particles)? };
        let ripple_config: RippleConfig = if ripples.is_undefined() { RippleConfig::default() } else { options(ripples)? };
        let cursor_config: CursorConfig = if cursor.is_undefined() { CursorConfig::default() } else { options(cursor)? };

        let mut overlay = Overlay::new(width, height);
        let seed = js_sys::Date::now().to_bits();

        // Rejected configs and missing layers are logged by the overlay; the others still mount.
        let _ = overlay.mount_particles(particle_config, surface_or_log("particles"), seed);
        let _ = overlay.mount_ripples(ripple_config.clone(), surface_or_log("ripples"));
        let marker = DomMarker::create(ripple_config.color)
            .inspect_err(|err| log::error!("cursor marker unavailable: {:?}", err))
            .ok();
        let _ = overlay.mount_cursor(cursor_config, marker);

        Ok(NeonOverlay { overlay })
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: f64) {
        self.overlay.pointer_move(x, y, now);
    }

    pub fn pointer_leave(&mut self) {
        self.overlay.pointer_leave();
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now: f64) {
        self.overlay.pointer_down(x, y, now);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.overlay.resize(width, height);
    }

    /// Call once per `requestAnimationFrame`. Returns effect frames run.
    pub fn frame(&mut self, now: f64) -> usize {
        self.overlay.frame(now)
    }

    pub fn set_particles_active(&mut self, active: bool) {
        self.overlay.set_particles_active(active);
    }

    pub fn set_ripples_active(&mut self, active: bool) {
        self.overlay.set_ripples_active(active);
    }

    pub fn set_cursor_active(&mut self, active: bool) {
        self.overlay.set_cursor_active(active);
    }

    pub fn update_particles(&mut self, value: JsValue) -> Result<(), JsValue> {
        let update: ParticleOptions = options(value)?;
        self.overlay.update_particle_options(&update).map_err(js_error)
    }

    pub fn update_ripples(&mut self, value: JsValue) -> Result<(), JsValue> {
        let update: RippleOptions = options(value)?;
        self.overlay.update_ripple_options(&update).map_err(js_error)
    }

    pub fn update_cursor(&mut self, value: JsValue) -> Result<(), JsValue> {
        let update: CursorOptions = options(value)?;
        self.overlay.update_cursor_options(&update).map_err(js_error)
    }

    /// Returns [fps, frameTimeMs] as of the last telemetry refresh.
    pub fn telemetry(&self) -> Vec<f64> {
        let meter = self.overlay.telemetry();
        vec![meter.frame_rate(), meter.frame_time()]
    }

    /// Mounted layers bottom to top, as `[{ name, zIndex }]`.
    pub fn layers(&self) -> JsValue {
        let layers: Vec<LayerEntry> = self
            .overlay
            .layers()
            .into_iter()
            .map(|(id, z_index)| LayerEntry { name: id.name(), z_index })
            .collect();
        serde_wasm_bindgen::to_value(&layers).unwrap_or(JsValue::NULL)
    }

    pub fn destroy(&mut self) {
        self.overlay.destroy();
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerEntry {
    name: &'static str,
    z_index: i32,
}
