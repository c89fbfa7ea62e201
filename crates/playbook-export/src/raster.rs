//! Software rasterizer for board steps.
//!
//! Draws the pitch and an element snapshot onto an RGBA pixmap. Text labels
//! are not rasterized (the export layer carries no font stack); everything
//! else renders.

use crate::{ExportError, ExportResult};
use kurbo::Point;
use playbook_core::document::{BoardDocument, Orientation, PitchKind};
use playbook_core::elements::{
    Arrow, Ball, Color, Drawing, Element, Equipment, EquipmentKind, Player, StrokeStyle, Zone,
};
use playbook_core::interpolate::interpolated_elements;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

/// Options for rendering a step to pixels.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per board unit.
    pub scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 10.0 }
    }
}

/// Render one step of the document to a pixmap.
pub fn render_step(
    document: &BoardDocument,
    step_index: usize,
    options: &RenderOptions,
) -> ExportResult<Pixmap> {
    let step = document
        .steps
        .get(step_index)
        .ok_or(ExportError::InvalidStep(step_index))?;
    render_elements(document, &step.elements, options)
}

/// Render a step blended towards the next one, for mid-animation frames.
pub fn render_step_at(
    document: &BoardDocument,
    step_index: usize,
    progress: f64,
    options: &RenderOptions,
) -> ExportResult<Pixmap> {
    let step = document
        .steps
        .get(step_index)
        .ok_or(ExportError::InvalidStep(step_index))?;
    match document.steps.get(step_index + 1) {
        Some(next) => {
            let blended = interpolated_elements(&step.elements, next, progress);
            render_elements(document, &blended, options)
        }
        None => render_elements(document, &step.elements, options),
    }
}

/// Render an arbitrary element snapshot against the document's pitch.
pub fn render_elements(
    document: &BoardDocument,
    elements: &[Element],
    options: &RenderOptions,
) -> ExportResult<Pixmap> {
    let (bw, bh) = document.pitch_settings.display_size();
    let width = (bw * options.scale).ceil() as u32;
    let height = (bh * options.scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| ExportError::Raster(format!("bad pixmap size {}x{}", width, height)))?;

    let mut canvas = Canvas {
        pixmap: &mut pixmap,
        scale: options.scale as f32,
    };
    canvas.draw_pitch(document);

    // Back-to-front: zones, drawings, arrows, equipment, players, ball
    for e in elements {
        if let Element::Zone(z) = e {
            canvas.draw_zone(z);
        }
    }
    for e in elements {
        if let Element::Drawing(d) = e {
            canvas.draw_drawing(d);
        }
    }
    for e in elements {
        if let Element::Arrow(a) = e {
            canvas.draw_arrow(a);
        }
    }
    for e in elements {
        if let Element::Equipment(eq) = e {
            canvas.draw_equipment(eq);
        }
    }
    for e in elements {
        if let Element::Player(p) = e {
            canvas.draw_player(p);
        }
    }
    for e in elements {
        if let Element::Ball(b) = e {
            canvas.draw_ball(b);
        }
    }

    Ok(pixmap)
}

/// Extract straight (non-premultiplied) RGBA bytes from a pixmap.
pub fn rgba_bytes(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

struct Canvas<'a> {
    pixmap: &'a mut Pixmap,
    scale: f32,
}

impl Canvas<'_> {
    fn px(&self, p: Point) -> (f32, f32) {
        (p.x as f32 * self.scale, p.y as f32 * self.scale)
    }

    fn paint(color: Color, opacity: f64) -> Paint<'static> {
        let mut paint = Paint::default();
        let a = (color.a as f64 * opacity.clamp(0.0, 1.0)) as u8;
        paint.set_color_rgba8(color.r, color.g, color.b, a);
        paint.anti_alias = true;
        paint
    }

    fn stroke_for(&self, width: f64, style: StrokeStyle) -> Stroke {
        let w = (width as f32 * self.scale).max(1.0);
        let mut stroke = Stroke {
            width: w,
            ..Stroke::default()
        };
        stroke.dash = match style {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => StrokeDash::new(vec![4.0 * w, 3.0 * w], 0.0),
            StrokeStyle::Dotted => StrokeDash::new(vec![w, 2.0 * w], 0.0),
        };
        stroke
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        let (cx, cy) = self.px(center);
        let mut pb = PathBuilder::new();
        pb.push_circle(cx, cy, radius);
        if let Some(path) = pb.finish() {
            self.pixmap
                .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, paint: &Paint, stroke: &Stroke) {
        let (cx, cy) = self.px(center);
        let mut pb = PathBuilder::new();
        pb.push_circle(cx, cy, radius);
        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, paint, stroke, Transform::identity(), None);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], paint: &Paint, stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        let (x, y) = self.px(points[0]);
        pb.move_to(x, y);
        for p in &points[1..] {
            let (x, y) = self.px(*p);
            pb.line_to(x, y);
        }
        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, paint, stroke, Transform::identity(), None);
        }
    }

    fn rect_path(&self, position: Point, width: f64, height: f64) -> Option<tiny_skia::Path> {
        let (x, y) = self.px(position);
        let rect =
            tiny_skia::Rect::from_xywh(x, y, width as f32 * self.scale, height as f32 * self.scale)?;
        let mut pb = PathBuilder::new();
        pb.push_rect(rect);
        pb.finish()
    }

    fn draw_pitch(&mut self, document: &BoardDocument) {
        let pitch = &document.pitch_settings;
        let (bw, bh) = pitch.display_size();

        let grass = match pitch.kind {
            PitchKind::Football => tiny_skia::Color::from_rgba8(60, 140, 70, 255),
            PitchKind::Futsal => tiny_skia::Color::from_rgba8(190, 120, 70, 255),
            PitchKind::Blank => tiny_skia::Color::from_rgba8(255, 255, 255, 255),
        };
        self.pixmap.fill(grass);

        if pitch.kind == PitchKind::Blank {
            return;
        }

        let line = Self::paint(Color::white(), 1.0);
        let stroke = self.stroke_for(0.25, StrokeStyle::Solid);
        let inset = 1.0;

        // Outline
        if let Some(path) =
            self.rect_path(Point::new(inset, inset), bw - 2.0 * inset, bh - 2.0 * inset)
        {
            self.pixmap
                .stroke_path(&path, &line, &stroke, Transform::identity(), None);
        }

        // Halfway line along the short axis
        let (a, b) = match pitch.orientation {
            Orientation::Landscape => (
                Point::new(bw / 2.0, inset),
                Point::new(bw / 2.0, bh - inset),
            ),
            Orientation::Portrait => (
                Point::new(inset, bh / 2.0),
                Point::new(bw - inset, bh / 2.0),
            ),
        };
        self.stroke_polyline(&[a, b], &line, &stroke);

        // Center circle
        let radius = match pitch.kind {
            PitchKind::Football => 9.15,
            PitchKind::Futsal => 3.0,
            PitchKind::Blank => 0.0,
        };
        self.stroke_circle(
            pitch.center(),
            radius as f32 * self.scale,
            &line,
            &stroke,
        );
    }

    fn draw_zone(&mut self, zone: &Zone) {
        let style = &zone.style;
        if let (Some(fill), Some(path)) = (
            style.fill_color,
            self.rect_path(zone.position, zone.width, zone.height),
        ) {
            let paint = Self::paint(fill, style.opacity);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        if let Some(path) = self.rect_path(zone.position, zone.width, zone.height) {
            let paint = Self::paint(style.stroke_color, style.opacity);
            let stroke = self.stroke_for(style.stroke_width, StrokeStyle::Solid);
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn draw_drawing(&mut self, drawing: &Drawing) {
        let paint = Self::paint(drawing.style.stroke_color, drawing.style.opacity);
        let stroke = self.stroke_for(drawing.style.stroke_width, StrokeStyle::Solid);
        self.stroke_polyline(&drawing.points, &paint, &stroke);
    }

    fn draw_arrow(&mut self, arrow: &Arrow) {
        let paint = Self::paint(arrow.style.stroke_color, arrow.style.opacity);
        let stroke = self.stroke_for(arrow.style.stroke_width, arrow.stroke_style);
        self.stroke_polyline(&[arrow.start, arrow.end], &paint, &stroke);

        // Arrowhead: two solid lines back from the tip
        let dir = arrow.direction();
        let perp = kurbo::Vec2::new(-dir.y, dir.x);
        let back = Point::new(
            arrow.end.x - dir.x * arrow.head_size,
            arrow.end.y - dir.y * arrow.head_size,
        );
        let left = Point::new(
            back.x + perp.x * arrow.head_size * 0.5,
            back.y + perp.y * arrow.head_size * 0.5,
        );
        let right = Point::new(
            back.x - perp.x * arrow.head_size * 0.5,
            back.y - perp.y * arrow.head_size * 0.5,
        );
        let head_stroke = self.stroke_for(arrow.style.stroke_width, StrokeStyle::Solid);
        self.stroke_polyline(&[left, arrow.end, right], &paint, &head_stroke);
    }

    fn draw_equipment(&mut self, equipment: &Equipment) {
        let style = &equipment.style;
        let fill = Self::paint(
            style.fill_color.unwrap_or(style.stroke_color),
            style.opacity,
        );
        let p = equipment.position;
        match equipment.kind {
            EquipmentKind::Cone => {
                let mut pb = PathBuilder::new();
                let (x0, y0) = self.px(Point::new(p.x, p.y - 1.0));
                let (x1, y1) = self.px(Point::new(p.x - 0.8, p.y + 0.8));
                let (x2, y2) = self.px(Point::new(p.x + 0.8, p.y + 0.8));
                pb.move_to(x0, y0);
                pb.line_to(x1, y1);
                pb.line_to(x2, y2);
                pb.close();
                if let Some(path) = pb.finish() {
                    self.pixmap.fill_path(
                        &path,
                        &fill,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            EquipmentKind::Marker => {
                self.fill_circle(p, 0.5 * self.scale, &fill);
            }
            EquipmentKind::Goal => {
                if let Some(path) = self.rect_path(Point::new(p.x - 3.66, p.y - 1.0), 7.32, 2.0) {
                    let stroke = self.stroke_for(style.stroke_width, StrokeStyle::Solid);
                    self.pixmap
                        .stroke_path(&path, &fill, &stroke, Transform::identity(), None);
                }
            }
            EquipmentKind::Ladder => {
                if let Some(path) = self.rect_path(Point::new(p.x - 1.0, p.y - 2.0), 2.0, 4.0) {
                    let stroke = self.stroke_for(style.stroke_width, StrokeStyle::Solid);
                    self.pixmap
                        .stroke_path(&path, &fill, &stroke, Transform::identity(), None);
                }
            }
            EquipmentKind::Hurdle => {
                let stroke = self.stroke_for(style.stroke_width * 2.0, StrokeStyle::Solid);
                self.stroke_polyline(
                    &[Point::new(p.x - 1.2, p.y), Point::new(p.x + 1.2, p.y)],
                    &fill,
                    &stroke,
                );
            }
        }
    }

    fn draw_player(&mut self, player: &Player) {
        let style = &player.style;
        let radius = Player::RADIUS as f32 * self.scale;
        if let Some(fill) = style.fill_color {
            let paint = Self::paint(fill, style.opacity);
            self.fill_circle(player.position, radius, &paint);
        }
        let outline = Self::paint(style.stroke_color, style.opacity);
        let stroke = self.stroke_for(style.stroke_width, StrokeStyle::Solid);
        self.stroke_circle(player.position, radius, &outline, &stroke);
    }

    fn draw_ball(&mut self, ball: &Ball) {
        let style = &ball.style;
        let radius = Ball::RADIUS as f32 * self.scale;
        let paint = Self::paint(style.fill_color.unwrap_or(Color::white()), style.opacity);
        self.fill_circle(ball.position, radius, &paint);
        let outline = Self::paint(style.stroke_color, style.opacity);
        let stroke = self.stroke_for(style.stroke_width, StrokeStyle::Solid);
        self.stroke_circle(ball.position, radius, &outline, &stroke);
    }
}
