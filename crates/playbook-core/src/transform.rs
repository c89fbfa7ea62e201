//! Pitch-orientation transform.
//!
//! Toggling between landscape and portrait remaps every element across every
//! step: points rotate 90° around the pitch center into the swapped frame,
//! zones re-center with width and height exchanged, rotation-bearing elements
//! pick up the quarter turn, and text labels stay upright.

use crate::document::{BoardDocument, Orientation};
use crate::elements::Element;
use kurbo::Point;

/// Toggle the document's pitch orientation, remapping all steps.
///
/// Landscape → portrait rotates clockwise, portrait → landscape rotates
/// counter-clockwise, so applying the toggle twice is the identity (within
/// float tolerance).
pub fn toggle_orientation(document: &mut BoardDocument) {
    let old_center = document.pitch_settings.center();
    let clockwise = document.pitch_settings.orientation == Orientation::Landscape;

    document.pitch_settings.orientation = document.pitch_settings.orientation.toggled();
    let new_center = document.pitch_settings.center();

    let map = |p: Point| rotate_about(p, old_center, new_center, clockwise);
    let turn = if clockwise { 90.0 } else { -90.0 };

    for step in &mut document.steps {
        for element in &mut step.elements {
            match element {
                Element::Player(e) => {
                    e.position = map(e.position);
                    e.rotation += turn;
                }
                Element::Ball(e) => {
                    e.position = map(e.position);
                }
                Element::Arrow(e) => {
                    e.start = map(e.start);
                    e.end = map(e.end);
                }
                Element::Zone(e) => {
                    // Rotate the center, then swap width/height around it
                    let center = map(e.center());
                    std::mem::swap(&mut e.width, &mut e.height);
                    e.position = Point::new(center.x - e.width / 2.0, center.y - e.height / 2.0);
                }
                Element::Text(e) => {
                    e.position = map(e.position);
                    // Annotations must stay upright
                    e.rotation = 0.0;
                }
                Element::Equipment(e) => {
                    e.position = map(e.position);
                    e.rotation += turn;
                }
                Element::Drawing(e) => {
                    for p in &mut e.points {
                        *p = map(*p);
                    }
                }
            }
        }
    }
    document.touch();
}

/// Rotate a point a quarter turn: translate relative to the old pitch center,
/// rotate ±90°, translate back relative to the new (swapped) center.
fn rotate_about(p: Point, old_center: Point, new_center: Point, clockwise: bool) -> Point {
    let rx = p.x - old_center.x;
    let ry = p.y - old_center.y;
    let (rx, ry) = if clockwise { (-ry, rx) } else { (ry, -rx) };
    Point::new(new_center.x + rx, new_center.y + ry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Arrow, Ball, Drawing, Player, Team, TextLabel, Zone};

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn sample_document() -> BoardDocument {
        let mut doc = BoardDocument::new();
        let mut player = Player::new(Team::Home, 4, Point::new(20.0, 30.0));
        player.rotation = 15.0;
        doc.steps[0].elements = vec![
            Element::Player(player),
            Element::Ball(Ball::new(Point::new(52.5, 34.0))),
            Element::Arrow(Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0))),
            Element::Zone(Zone::new(Point::new(5.0, 5.0), 20.0, 10.0)),
            Element::Text(TextLabel::new(Point::new(40.0, 10.0), "press here")),
            Element::Drawing(Drawing::from_points(vec![
                Point::new(1.0, 2.0),
                Point::new(3.0, 4.0),
            ])),
        ];
        doc
    }

    #[test]
    fn test_toggle_flips_orientation() {
        let mut doc = sample_document();
        toggle_orientation(&mut doc);
        assert_eq!(doc.pitch_settings.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut doc = sample_document();
        let original = doc.steps[0].elements.clone();

        toggle_orientation(&mut doc);
        toggle_orientation(&mut doc);

        assert_eq!(doc.pitch_settings.orientation, Orientation::Landscape);
        for (before, after) in original.iter().zip(&doc.steps[0].elements) {
            assert!(close(before.position(), after.position()));
            assert!((before.rotation() - after.rotation()).abs() < EPS);
            if let (Element::Zone(a), Element::Zone(b)) = (before, after) {
                assert!((a.width - b.width).abs() < EPS);
                assert!((a.height - b.height).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_center_stays_at_center() {
        let mut doc = BoardDocument::new();
        let center = doc.pitch_settings.center();
        doc.steps[0].elements = vec![Element::Ball(Ball::new(center))];

        toggle_orientation(&mut doc);
        let new_center = doc.pitch_settings.center();
        assert!(close(doc.steps[0].elements[0].position(), new_center));
    }

    #[test]
    fn test_zone_swaps_dimensions() {
        let mut doc = sample_document();
        toggle_orientation(&mut doc);
        let zone = doc.steps[0]
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Zone(z) => Some(z),
                _ => None,
            })
            .unwrap();
        assert_eq!(zone.width, 10.0);
        assert_eq!(zone.height, 20.0);
    }

    #[test]
    fn test_text_stays_upright() {
        let mut doc = sample_document();
        if let Element::Text(t) = &mut doc.steps[0].elements[4] {
            t.rotation = 30.0;
        }
        toggle_orientation(&mut doc);
        let Element::Text(text) = &doc.steps[0].elements[4] else {
            unreachable!()
        };
        assert_eq!(text.rotation, 0.0);
    }

    #[test]
    fn test_all_steps_are_remapped() {
        let mut doc = sample_document();
        let mut second = doc.steps[0].clone();
        second.id = "second".to_string();
        doc.steps.push(second);

        let before = doc.steps[1].elements[1].position();
        toggle_orientation(&mut doc);
        assert!(!close(doc.steps[1].elements[1].position(), before));
        assert!(close(
            doc.steps[0].elements[1].position(),
            doc.steps[1].elements[1].position()
        ));
    }
}
