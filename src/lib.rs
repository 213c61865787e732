mod color;
mod dom;
mod field;
mod particle;
mod renderer;
mod utils;
mod viewport;

pub use color::Color;
pub use field::{connection_strength, ParticleField};
pub use particle::Particle;
pub use renderer::Renderer;
pub use viewport::Viewport;

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, HtmlCanvasElement, MouseEvent, Window};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

pub(crate) fn js_err(message: &str) -> JsValue {
    JsValue::from_str(message)
}

/// Everything the background animation reads and writes each frame: the
/// viewport, the last pointer position (surface pixels), and the
/// particle field itself.
pub struct Scene {
    pub viewport: Viewport,
    pub pointer: Vector2<f64>,
    pub field: ParticleField,
}

impl Scene {
    pub fn new(logical_width: f64, logical_height: f64, device_pixel_ratio: f64) -> Scene {
        Scene {
            viewport: Viewport::new(logical_width, logical_height, device_pixel_ratio),
            pointer: [0.0, 0.0],
            field: ParticleField::new(),
        }
    }

    /// Swap in a new viewport and rebuild the particle set from scratch.
    /// Nothing from the old set survives.
    pub fn rebuild<R: Rng>(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        device_pixel_ratio: f64,
        rng: &mut R,
    ) {
        self.viewport = Viewport::new(logical_width, logical_height, device_pixel_ratio);
        self.field.regenerate(&self.viewport, rng);
    }

    /// Record the pointer, scaled into surface pixels.
    pub fn set_pointer(&mut self, client_x: f64, client_y: f64) {
        self.pointer = self.viewport.to_surface(client_x, client_y);
    }

    /// One frame: the physics step runs to completion before the
    /// renderer reads the field.
    pub fn tick(&mut self, renderer: &Renderer) -> Result<(), JsValue> {
        self.field.advance(&self.viewport);
        renderer.render(&self.field, self.pointer, &self.viewport)
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    utils::set_panic_hook();

    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    dom::init_menu(&document)?;
    dom::init_footer_year(&document)?;
    dom::init_tilt_card(&document)?;
    start_background(&window, &document)?;

    console::log_1(&"site effects ready".into());
    Ok(())
}

// Wires the canvas background: initial sizing, the resize and pointer
// handlers, and the self-rescheduling animation loop.
fn start_background(window: &Window, document: &Document) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("bg")
        .ok_or_else(|| js_err("missing #bg canvas"))?
        .dyn_into()?;

    let renderer = Renderer::new(&canvas)?;
    let scene = Rc::new(RefCell::new(Scene::new(0.0, 0.0, 1.0)));

    resize_scene(window, &canvas, &mut scene.borrow_mut());
    {
        let window_for_resize = window.clone();
        let canvas = canvas.clone();
        let scene = scene.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            resize_scene(&window_for_resize, &canvas, &mut scene.borrow_mut());
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    // Every pointer event writes straight into the scene, no throttling.
    {
        let scene = scene.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            scene
                .borrow_mut()
                .set_pointer(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    // `f` holds the animation-frame closure so it can reschedule itself;
    // the loop runs for the lifetime of the page.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let window_for_loop = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(err) = scene.borrow_mut().tick(&renderer) {
            console::error_1(&err);
        }
        let _ = window_for_loop
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }) as Box<dyn FnMut()>));
    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    Ok(())
}

// Match the canvas bitmap to the window, stretch it over the viewport,
// and rebuild the field. Runs at load and on every resize event.
fn resize_scene(window: &Window, canvas: &HtmlCanvasElement, scene: &mut Scene) {
    let _timer = Timer::new("Scene::rebuild");
    let logical_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let logical_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    let mut rng = rand::thread_rng();
    scene.rebuild(
        logical_width,
        logical_height,
        window.device_pixel_ratio(),
        &mut rng,
    );

    canvas.set_width(scene.viewport.surface_width() as u32);
    canvas.set_height(scene.viewport.surface_height() as u32);
    let style = canvas.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn scene_rebuild_fills_field() {
        let mut scene = Scene::new(0.0, 0.0, 1.0);
        let mut rng = rand::thread_rng();
        scene.rebuild(1200.0, 800.0, 1.0, &mut rng);
        assert_eq!(scene.field.len(), 53);
    }

    #[wasm_bindgen_test]
    fn pointer_scales_with_ratio() {
        let mut scene = Scene::new(800.0, 600.0, 2.0);
        scene.set_pointer(10.0, 20.0);
        assert_eq!(scene.pointer, [20.0, 40.0]);
    }
}
