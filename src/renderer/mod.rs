//! Scene rendering
//!
//! Drawing is written against [`Painter`], a 2D immediate-mode surface shaped
//! like the browser's Canvas2D context. The browser build implements it on
//! `CanvasRenderingContext2d`; tests use a recording painter.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;
pub mod sprites;

#[cfg(test)]
pub(crate) mod recording;

pub use scene::{draw_frame, draw_splash, hills};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
}

/// Immediate-mode 2D drawing surface
///
/// Path calls follow canvas semantics: `begin_path`, segments, then
/// `fill`/`stroke`/`clip` on the current path. Drawing never fails; an
/// implementation that hits a backend error just skips the call.
pub trait Painter {
    /// Decoded image the surface can blit
    type Image;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, x: f64, y: f64);
    fn set_global_alpha(&mut self, alpha: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64);
    fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, rotation: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Width of `text` in the current font
    fn measure_text(&mut self, text: &str) -> f64;

    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64);

    /// Full circle path at (x, y)
    fn circle(&mut self, x: f64, y: f64, radius: f64) {
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
    }

    /// Rounded rectangle path (not filled or stroked)
    fn rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        self.begin_path();
        self.move_to(x + r, y);
        self.arc_to(x + w, y, x + w, y + h, r);
        self.arc_to(x + w, y + h, x, y + h, r);
        self.arc_to(x, y + h, x, y, r);
        self.arc_to(x, y, x + w, y, r);
        self.close_path();
    }
}
