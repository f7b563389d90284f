use crate::config::ZoomConfig;
use crate::graph::Point;
use tracing::warn;

/// Canvas zoom and the screen position of the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    origin: Point,
    limits: ZoomConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl Viewport {
    /// Creates a viewport at `limits.initial`.
    ///
    /// Incoherent limits (inverted range, zero or non-finite values) are
    /// replaced by [`ZoomConfig::default`].
    pub fn new(limits: ZoomConfig) -> Self {
        let limits = match limits.validate() {
            Ok(()) => limits,
            Err(e) => {
                warn!(error = %e, "falling back to default zoom limits");
                ZoomConfig::default()
            }
        };
        Self {
            zoom: limits.initial,
            origin: Point::ORIGIN,
            limits,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the canvas origin, e.g. when the canvas element is laid out.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Sets the zoom factor, clamped to the configured range.
    ///
    /// Values that are not finite and positive are ignored and the current
    /// zoom is returned unchanged.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if !zoom.is_finite() || zoom <= 0.0 {
            return self.zoom;
        }
        self.zoom = round2(zoom.clamp(self.limits.min, self.limits.max));
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - self.limits.step)
    }

    /// Zoom as a whole percentage, as shown in the toolbar.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Converts a screen point into canvas space.
    pub fn to_canvas(&self, screen: Point) -> Point {
        (screen - self.origin) / self.zoom
    }

    /// Converts a canvas point into screen space.
    pub fn to_screen(&self, canvas: Point) -> Point {
        canvas * self.zoom + self.origin
    }
}

// Keeps repeated +/- steps from drifting (0.1 + 0.2 != 0.3).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
