//! Position interpolation between adjacent steps.
//!
//! Pure and stateless: every playback frame recomputes the blended geometry
//! from the two keyframe snapshots, nothing accumulates.

use crate::document::Step;
use crate::elements::Element;
use kurbo::Point;

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Ease-in-out cubic curve mapping raw progress to shaped progress.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Blend an element towards its counterpart in the next step.
///
/// The counterpart is looked up by ID; if the element is absent from the next
/// step (or changed kind), the current value passes through unchanged.
/// Progress 0 returns the current value exactly, progress 1 the next-step
/// value exactly.
pub fn interpolated(current: &Element, next_step: &Step, progress: f64) -> Element {
    let Some(next) = next_step.element(current.id()) else {
        return current.clone();
    };

    match (current, next) {
        (Element::Arrow(a), Element::Arrow(b)) => {
            let mut out = a.clone();
            out.start = lerp_point(a.start, b.start, progress);
            out.end = lerp_point(a.end, b.end, progress);
            Element::Arrow(out)
        }
        (Element::Zone(a), Element::Zone(b)) => {
            let mut out = a.clone();
            out.position = lerp_point(a.position, b.position, progress);
            out.width = lerp(a.width, b.width, progress);
            out.height = lerp(a.height, b.height, progress);
            Element::Zone(out)
        }
        (Element::Player(a), Element::Player(b)) => {
            let mut out = a.clone();
            out.position = lerp_point(a.position, b.position, progress);
            Element::Player(out)
        }
        (Element::Ball(a), Element::Ball(b)) => {
            let mut out = a.clone();
            out.position = lerp_point(a.position, b.position, progress);
            Element::Ball(out)
        }
        (Element::Equipment(a), Element::Equipment(b)) => {
            let mut out = a.clone();
            out.position = lerp_point(a.position, b.position, progress);
            Element::Equipment(out)
        }
        (Element::Text(a), Element::Text(b)) => {
            let mut out = a.clone();
            out.position = lerp_point(a.position, b.position, progress);
            Element::Text(out)
        }
        // Drawings and mismatched kinds pass through
        _ => current.clone(),
    }
}

/// Blend a whole element array towards the next step.
pub fn interpolated_elements(elements: &[Element], next_step: &Step, progress: f64) -> Vec<Element> {
    elements
        .iter()
        .map(|e| interpolated(e, next_step, progress))
        .collect()
}
