use serde::Serialize;

use crate::detector::FaceBox;

/// Vertical gap between the box top and its label, in display pixels.
const LABEL_GAP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Drawing instructions for one detection, in display-surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPlan {
    pub bounding_box: Rect,
    pub label: OverlayLabel,
}

/// Maps a detection's native-space geometry onto the display surface.
///
/// Stateless and deterministic. The scale is aspect-preserving (the smaller
/// of the two axis ratios) with centering offsets, so the box stays glued to
/// the face when the displayed frame is letterboxed.
pub fn plan_overlay(
    face_box: FaceBox,
    native: (u32, u32),
    display: (u32, u32),
    label_text: &str,
) -> OverlayPlan {
    let (native_w, native_h) = (native.0 as f64, native.1 as f64);
    let (display_w, display_h) = (display.0 as f64, display.1 as f64);

    let scale = if native_w > 0.0 && native_h > 0.0 {
        (display_w / native_w).min(display_h / native_h)
    } else {
        0.0
    };
    let offset_x = (display_w - native_w * scale) / 2.0;
    let offset_y = (display_h - native_h * scale) / 2.0;

    let bounding_box = Rect {
        x: face_box.x * scale + offset_x,
        y: face_box.y * scale + offset_y,
        width: face_box.width * scale,
        height: face_box.height * scale,
    };
    let label = OverlayLabel {
        text: label_text.to_string(),
        x: bounding_box.x,
        y: (bounding_box.y - LABEL_GAP).max(0.0),
    };

    OverlayPlan {
        bounding_box,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE: FaceBox = FaceBox {
        x: 100.0,
        y: 80.0,
        width: 120.0,
        height: 140.0,
    };

    #[test]
    fn identity_when_display_matches_native() {
        let plan = plan_overlay(FACE, (640, 480), (640, 480), "happy 70%");
        assert_eq!(plan.bounding_box.x, 100.0);
        assert_eq!(plan.bounding_box.y, 80.0);
        assert_eq!(plan.bounding_box.width, 120.0);
        assert_eq!(plan.bounding_box.height, 140.0);
        assert_eq!(plan.label.text, "happy 70%");
    }

    #[test]
    fn uniform_scale_when_aspect_matches() {
        let plan = plan_overlay(FACE, (640, 480), (1280, 960), "x");
        assert_eq!(plan.bounding_box.x, 200.0);
        assert_eq!(plan.bounding_box.y, 160.0);
        assert_eq!(plan.bounding_box.width, 240.0);
        assert_eq!(plan.bounding_box.height, 280.0);
    }

    #[test]
    fn letterboxing_centers_the_frame() {
        // 640x480 shown on a 1280x480 surface: scale 1.0, 320 px side bars.
        let plan = plan_overlay(FACE, (640, 480), (1280, 480), "x");
        assert_eq!(plan.bounding_box.x, 420.0);
        assert_eq!(plan.bounding_box.y, 80.0);
        assert_eq!(plan.bounding_box.width, 120.0);
        assert_eq!(plan.bounding_box.height, 140.0);
    }

    #[test]
    fn label_sits_above_the_box_and_clamps_to_the_surface() {
        let plan = plan_overlay(FACE, (640, 480), (640, 480), "x");
        assert_eq!(plan.label.x, plan.bounding_box.x);
        assert_eq!(plan.label.y, 74.0);

        let top_face = FaceBox {
            x: 10.0,
            y: 2.0,
            width: 50.0,
            height: 50.0,
        };
        let plan = plan_overlay(top_face, (640, 480), (640, 480), "x");
        assert_eq!(plan.label.y, 0.0);
    }

    #[test]
    fn equal_inputs_produce_equal_plans() {
        let a = plan_overlay(FACE, (640, 480), (320, 240), "sad 40%");
        let b = plan_overlay(FACE, (640, 480), (320, 240), "sad 40%");
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_native_dimensions_collapse_to_zero() {
        let plan = plan_overlay(FACE, (0, 480), (640, 480), "x");
        assert_eq!(plan.bounding_box.width, 0.0);
        assert_eq!(plan.bounding_box.height, 0.0);
    }
}
