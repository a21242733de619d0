//! Painter that records calls, for renderer tests

use super::{Painter, TextAlign, TextBaseline};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Alpha(f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    BeginPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Quad(f64, f64, f64, f64),
    Arc { x: f64, y: f64, r: f64 },
    ArcTo,
    Ellipse { x: f64, y: f64, rx: f64, ry: f64 },
    Fill,
    Stroke,
    Clip,
    Font(String),
    Align(TextAlign),
    Baseline(TextBaseline),
    Text(String, f64, f64),
    Image { id: u32, x: f64, y: f64, w: f64, h: f64 },
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<Op>,
}

impl RecordingPainter {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_style(&self, color: &str) -> bool {
        self.ops.iter().any(|op| match op {
            Op::FillStyle(c) | Op::StrokeStyle(c) => c == color,
            _ => false,
        })
    }
}

impl Painter for RecordingPainter {
    type Image = u32;

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(Op::Translate(x, y));
    }
    fn rotate(&mut self, angle: f64) {
        self.ops.push(Op::Rotate(angle));
    }
    fn scale(&mut self, x: f64, y: f64) {
        self.ops.push(Op::Scale(x, y));
    }
    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::Alpha(alpha));
    }
    fn set_fill_style(&mut self, color: &str) {
        self.ops.push(Op::FillStyle(color.to_owned()));
    }
    fn set_stroke_style(&mut self, color: &str) {
        self.ops.push(Op::StrokeStyle(color.to_owned()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::StrokeRect(x, y, w, h));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ops.push(Op::Quad(cpx, cpy, x, y));
    }
    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.ops.push(Op::Arc { x, y, r: radius });
    }
    fn arc_to(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _radius: f64) {
        self.ops.push(Op::ArcTo);
    }
    fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, _rotation: f64) {
        self.ops.push(Op::Ellipse { x, y, rx, ry });
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
    fn clip(&mut self) {
        self.ops.push(Op::Clip);
    }
    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_owned()));
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(Op::Align(align));
    }
    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ops.push(Op::Baseline(baseline));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(Op::Text(text.to_owned(), x, y));
    }
    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * 8.0
    }
    fn draw_image(&mut self, image: &u32, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(Op::Image { id: *image, x, y, w, h });
    }
}
