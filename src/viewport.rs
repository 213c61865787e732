// Viewport bookkeeping shared by the physics step and the renderer.
// Logical (CSS pixel) dimensions drive the particle count, surface
// (device pixel) dimensions drive positions and drawing.

use vecmath::Vector2;

#[derive(Copy, Clone)]
pub struct Viewport {
    logical_width: f64,
    logical_height: f64,
    pixel_ratio: f64,
}

impl Viewport {
    pub const MAX_PIXEL_RATIO: f64 = 2.0;

    // A host reporting a ratio of 0 (or anything non-positive) gets the
    // same fallback the page script used: 1.
    pub fn new(logical_width: f64, logical_height: f64, device_pixel_ratio: f64) -> Viewport {
        let pixel_ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(Self::MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Viewport {
            logical_width,
            logical_height,
            pixel_ratio,
        }
    }

    pub fn logical_area(&self) -> f64 {
        self.logical_width * self.logical_height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn surface_width(&self) -> f64 {
        (self.logical_width * self.pixel_ratio).floor()
    }

    pub fn surface_height(&self) -> f64 {
        (self.logical_height * self.pixel_ratio).floor()
    }

    // Client (CSS pixel) coordinates -> surface coordinates
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> Vector2<f64> {
        [client_x * self.pixel_ratio, client_y * self.pixel_ratio]
    }
}
