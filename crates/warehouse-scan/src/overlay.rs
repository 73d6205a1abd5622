//! Per-frame visual feedback on the scanner overlay.

use crate::recognizer::{DrawingSurface, FrameResult, Point, Stroke};

/// Outline of the region the locator is tracking.
pub const TRACKING_STROKE: Stroke = Stroke {
    color: "#00FF00",
    width: 3.0,
};

/// Fixed aiming crosshair.
pub const CROSSHAIR_STROKE: Stroke = Stroke {
    color: "#FF0000",
    width: 2.0,
};

/// Half-length of each crosshair arm, in pixels.
pub const CROSSHAIR_ARM: f64 = 20.0;

pub const CROSSHAIR_RADIUS: f64 = 8.0;

/// Redraws the overlay for one processed frame.
///
/// The crosshair is drawn on every frame, tracked region or not.
pub fn draw_frame_feedback(surface: &mut dyn DrawingSurface, frame: &FrameResult) {
    surface.clear();

    if let Some(region) = frame.bounding_box {
        surface.stroke_rect(region, TRACKING_STROKE);
    }

    let cx = surface.width() / 2.0;
    let cy = surface.height() / 2.0;
    surface.stroke_line(
        Point::new(cx - CROSSHAIR_ARM, cy),
        Point::new(cx + CROSSHAIR_ARM, cy),
        CROSSHAIR_STROKE,
    );
    surface.stroke_line(
        Point::new(cx, cy - CROSSHAIR_ARM),
        Point::new(cx, cy + CROSSHAIR_ARM),
        CROSSHAIR_STROKE,
    );
    surface.stroke_circle(Point::new(cx, cy), CROSSHAIR_RADIUS, CROSSHAIR_STROKE);
}
