// Renderer struct that handles the 2d canvas calls for the background:
// clearing the surface, the ambient gradient wash, the particle dots,
// and the connection lines between near particles.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use vecmath::Vector2;

use crate::color::Color;
use crate::field::{connection_strength, ParticleField};
use crate::viewport::Viewport;

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    /// Connection radius in logical pixels; scaled by the pixel ratio
    /// at draw time.
    pub const CONNECTION_RADIUS: f64 = 120.0;
    pub const CONNECTION_ALPHA: f64 = 0.08;
    const DOT_ALPHA_BASE: f64 = 0.25;
    const DOT_ALPHA_DEPTH: f64 = 0.55;
    const VIOLET: Color = Color {
        r: 86,
        g: 77,
        b: 255,
    };
    const TEAL: Color = Color {
        r: 0,
        g: 255,
        b: 209,
    };

    // Grabs the 2d context from the canvas on the DOM. A canvas without
    // one is a startup failure, not something the frame loop handles.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Renderer, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Renderer { context })
    }

    pub fn render(
        &self,
        field: &ParticleField,
        pointer: Vector2<f64>,
        viewport: &Viewport,
    ) -> Result<(), JsValue> {
        let width = viewport.surface_width();
        let height = viewport.surface_height();
        self.context.clear_rect(0.0, 0.0, width, height);
        self.draw_backdrop(width, height)?;
        self.draw_particles(field, pointer, viewport)?;
        self.draw_connections(field, viewport);
        Ok(())
    }

    // Subtle vignette behind the particles. Rebuilt every frame since
    // the surface size can change between frames.
    fn draw_backdrop(&self, width: f64, height: f64) -> Result<(), JsValue> {
        let cx = width * 0.7;
        let cy = height * 0.25;
        let gradient = self
            .context
            .create_radial_gradient(cx, cy, 0.0, cx, cy, width.max(height) * 0.8)?;
        gradient.add_color_stop(0.0, &Self::VIOLET.rgba(0.10))?;
        gradient.add_color_stop(0.55, &Self::TEAL.rgba(0.05))?;
        gradient.add_color_stop(1.0, "rgba(0,0,0,0)")?;
        self.context.set_fill_style(&gradient);
        self.context.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    // Nearer particles draw larger and more opaque.
    fn draw_particles(
        &self,
        field: &ParticleField,
        pointer: Vector2<f64>,
        viewport: &Viewport,
    ) -> Result<(), JsValue> {
        for particle in field.particles() {
            let [x, y] = particle.draw_pos(pointer, viewport);
            let alpha = Self::DOT_ALPHA_BASE + Self::DOT_ALPHA_DEPTH * particle.depth;
            self.context.begin_path();
            self.context
                .set_fill_style(&JsValue::from_str(&Color::WHITE.rgba(alpha)));
            self.context.arc(
                x,
                y,
                particle.radius * particle.depth * viewport.pixel_ratio(),
                0.0,
                std::f64::consts::PI * 2.0,
            )?;
            self.context.fill();
        }
        Ok(())
    }

    // All-pairs scan over stored positions. Quadratic, and fine: the
    // field caps density by area, so n stays around a hundred.
    fn draw_connections(&self, field: &ParticleField, viewport: &Viewport) {
        let radius = Self::CONNECTION_RADIUS * viewport.pixel_ratio();
        let particles = field.particles();
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let a = &particles[i];
                let b = &particles[j];
                if let Some(strength) = connection_strength(a, b, radius) {
                    let alpha = Self::CONNECTION_ALPHA * strength;
                    self.context
                        .set_stroke_style(&JsValue::from_str(&Color::WHITE.rgba(alpha)));
                    self.context.set_line_width(a.depth.min(b.depth));
                    self.context.begin_path();
                    self.context.move_to(a.pos[0], a.pos[1]);
                    self.context.line_to(b.pos[0], b.pos[1]);
                    self.context.stroke();
                }
            }
        }
    }
}
