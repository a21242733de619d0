//! Canvas dimensions and pointer coordinate mapping

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DPR, SPAWN_MARGIN, UI_RESERVE};

/// Canvas backing-store size in device pixels plus the ratio used to get there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            dpr: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self { width, height, dpr }
    }

    /// Build from CSS pixel size and the raw device pixel ratio
    ///
    /// The ratio is capped at [`MAX_DPR`]; a missing/invalid ratio counts as 1.
    pub fn from_css(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_DPR)
        } else {
            1.0
        };
        Self {
            width: (css_width * dpr).floor().max(0.0),
            height: (css_height * dpr).floor().max(0.0),
            dpr,
        }
    }

    /// Convert a client (CSS) coordinate to canvas pixel space
    pub fn client_to_canvas(&self, client: DVec2, canvas_origin: DVec2) -> DVec2 {
        (client - canvas_origin) * self.dpr
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Spawn area as (origin, extent); extents never go negative
    pub fn spawn_area(&self) -> (DVec2, DVec2) {
        let origin = DVec2::new(SPAWN_MARGIN, UI_RESERVE);
        let extent = DVec2::new(
            (self.width - 2.0 * SPAWN_MARGIN).max(0.0),
            (self.height - UI_RESERVE - SPAWN_MARGIN).max(0.0),
        );
        (origin, extent)
    }
}
