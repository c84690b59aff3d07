//! Pan/zoom mapping between screen pixels and world centimeters.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::polygon::Bounds;
use crate::model::Point;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
pub const ZOOM_IN_STEP: f64 = 1.1;
pub const ZOOM_OUT_STEP: f64 = 0.9;

/// Size of the drawing surface in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// `screen = world * scale + pan`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform { pan_x: 0.0, pan_y: 0.0, scale: 1.0 }
    }
}

impl ViewTransform {
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan_x) / self.scale, (screen.y - self.pan_y) / self.scale)
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.pan_x, world.y * self.scale + self.pan_y)
    }

    pub fn screen_dist_to_world(&self, d: f64) -> f64 {
        d / self.scale
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// One wheel tick: positive `delta_y` zooms out (x0.9), negative zooms in (x1.1).
    ///
    /// The zoom is anchored at the world origin; `anchor` is accepted for the
    /// event contract but pan is left untouched, so the point under the cursor
    /// drifts. Returns the new scale.
    pub fn zoom(&mut self, delta_y: f64, anchor: Point) -> f64 {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return self.scale;
        }
        let factor = if delta_y > 0.0 { ZOOM_OUT_STEP } else { ZOOM_IN_STEP };
        self.set_scale(self.scale * factor);
        trace!(scale = self.scale, anchor_x = anchor.x, anchor_y = anchor.y, "zoom");
        self.scale
    }

    /// Pan so the bounding-box center of `points` lands on the viewport center
    /// at the current scale. Returns `false` for an empty set.
    pub fn center_on(&mut self, points: &[Point], viewport: Viewport) -> bool {
        let Some(b) = Bounds::of(points) else {
            return false;
        };
        let c = b.center();
        let vc = viewport.center();
        self.pan_x = vc.x - c.x * self.scale;
        self.pan_y = vc.y - c.y * self.scale;
        true
    }

    /// Choose the largest scale (within limits) at which `points` plus
    /// `padding_px` on every side fit the viewport, then center on them.
    pub fn fit_to(&mut self, points: &[Point], viewport: Viewport, padding_px: f64) -> bool {
        let Some(b) = Bounds::of(points) else {
            return false;
        };
        let avail_w = viewport.width - 2.0 * padding_px;
        let avail_h = viewport.height - 2.0 * padding_px;
        if avail_w > 0.0 && avail_h > 0.0 {
            let sx = if b.width() > 0.0 { avail_w / b.width() } else { MAX_SCALE };
            let sy = if b.height() > 0.0 { avail_h / b.height() } else { MAX_SCALE };
            self.set_scale(sx.min(sy));
        }
        self.center_on(points, viewport)
    }
}
