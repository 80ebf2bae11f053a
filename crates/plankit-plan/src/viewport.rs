//! Mapping between screen pixels and plan coordinates.
//!
//! The plan is drawn Y-down like its model, so the mapping is a uniform
//! scale plus an origin offset. Pixel thresholds used by picking, such as
//! the selection margin, divide by the scale to stay constant on screen
//! whatever the zoom level.

/// Scale applied when a viewport is created, in pixels per centimeter.
pub const DEFAULT_SCALE: f64 = 0.5;

const MINIMUM_SCALE: f64 = 0.05;
const MAXIMUM_SCALE: f64 = 20.0;

/// Visible window onto the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    x_origin: f64,
    y_origin: f64,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            x_origin: 0.0,
            y_origin: 0.0,
        }
    }

    /// Gets the scale in pixels per centimeter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale, clamped to the supported zoom range. Returns whether
    /// the scale actually changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let clamped = scale.clamp(MINIMUM_SCALE, MAXIMUM_SCALE);
        if clamped != self.scale {
            self.scale = clamped;
            true
        } else {
            false
        }
    }

    /// Multiplies the scale by `factor`, keeping it within the zoom range.
    pub fn zoom(&mut self, factor: f64) -> bool {
        self.set_scale(self.scale * factor)
    }

    /// Length in centimeters covered by one pixel at the current scale.
    pub fn pixel_length(&self) -> f64 {
        1.0 / self.scale
    }

    /// Gets the model coordinates of the top left displayed corner.
    pub fn origin(&self) -> (f64, f64) {
        (self.x_origin, self.y_origin)
    }

    /// Translates the origin by (dx, dy) centimeters.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_origin += dx;
        self.y_origin += dy;
    }

    /// Converts a screen point to model coordinates.
    pub fn pixel_to_model(&self, px: f64, py: f64) -> (f64, f64) {
        (
            self.x_origin + px / self.scale,
            self.y_origin + py / self.scale,
        )
    }

    /// Converts a model point to screen coordinates.
    pub fn model_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.x_origin) * self.scale,
            (y - self.y_origin) * self.scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
