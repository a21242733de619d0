//! Whole-frame drawing: sky, hills, entities, splats and the title screen

use crate::assets::AssetSet;
use crate::consts::{BAD_COLOR, GOOD_COLOR, HILL_BANDS, SKY};
use crate::sim::Session;
use crate::sim::viewport::Viewport;

use super::sprites::draw_entity;
use super::{Painter, TextAlign, TextBaseline};

/// Decorative parallax hills, four bands each lower than the last
pub fn hills<P: Painter>(p: &mut P, viewport: &Viewport) {
    let (w, h) = (viewport.width, viewport.height);
    for (i, color) in HILL_BANDS.iter().enumerate() {
        let band = i as f64;
        let y = h * 0.6 + band * 25.0;
        p.set_fill_style(color);
        p.begin_path();
        p.move_to(0.0, y);
        let mut x = 0.0;
        while x <= w {
            p.quadratic_curve_to(x + 20.0, y - 20.0 - band * 3.0, x + 40.0, y);
            x += 40.0;
        }
        p.line_to(w, h);
        p.line_to(0.0, h);
        p.close_path();
        p.fill();
    }
}

fn background<P: Painter>(p: &mut P, viewport: &Viewport) {
    p.set_fill_style(SKY);
    p.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    hills(p, viewport);
}

/// Speech-bubble font size for a viewport
pub fn bubble_font_px(viewport: &Viewport) -> f64 {
    (viewport.min_side() * 0.03).floor()
}

/// Draw one gameplay frame from an already-culled session
///
/// Entities are drawn oldest first so the newest is on top, matching the
/// hit tester's priority.
pub fn draw_frame<P: Painter>(
    p: &mut P,
    session: &Session,
    assets: &AssetSet<P::Image>,
    now: f64,
    animate: bool,
) {
    let viewport = &session.viewport;
    background(p, viewport);

    let font_px = bubble_font_px(viewport);
    for e in session.entities.iter().filter(|e| e.is_visible(now)) {
        draw_entity(p, e, assets, now, font_px, animate);
    }

    for splat in session.splats.iter().filter(|s| s.is_alive(now)) {
        p.save();
        p.set_global_alpha(splat.alpha(now));
        p.set_fill_style(if splat.correct { GOOD_COLOR } else { BAD_COLOR });
        for particle in &splat.particles {
            let c = splat.center + particle.offset;
            p.begin_path();
            p.ellipse(c.x, c.y, 10.0, 16.0, particle.angle);
            p.fill();
        }
        p.restore();
    }
}

/// Title screen shown before the first round and after each round
pub fn draw_splash<P: Painter>(p: &mut P, viewport: &Viewport) {
    background(p, viewport);

    let (w, h) = (viewport.width, viewport.height);
    let bw = (w * 0.8).min(800.0);
    let bh = (h * 0.5).min(380.0);
    let x = (w - bw) / 2.0;
    let y = (h - bh) / 2.0;

    p.save();
    p.translate(x + 5.0, y + 5.0);
    p.set_fill_style("#000");
    p.rounded_rect(0.0, 0.0, bw, bh, 20.0);
    p.fill();
    p.translate(-5.0, -5.0);
    p.set_fill_style(BAD_COLOR);
    p.rounded_rect(0.0, 0.0, bw, bh, 20.0);
    p.fill();
    p.set_line_width(10.0);
    p.set_stroke_style("#000");
    p.rounded_rect(0.0, 0.0, bw, bh, 20.0);
    p.stroke();

    p.set_fill_style("#fff");
    p.set_text_align(TextAlign::Center);
    p.set_text_baseline(TextBaseline::Alphabetic);
    p.set_font(&format!("{}px Impact, Arial Black, sans-serif", (bh * 0.14).floor()));
    p.fill_text("PAS D'ÉCRAN !", bw / 2.0, bh * 0.33);
    p.set_font(&format!("{}px Arial Black, sans-serif", (bh * 0.07).floor()));
    p.fill_text("Touche les enfants sur un écran interdit", bw / 2.0, bh * 0.55);
    p.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{Op, RecordingPainter};
    use crate::sim::entity::{DeviceStatus, EntityKind, test_entity};
    use crate::sim::{Splat, pointer_down};
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> Session {
        let mut s = Session::new(1, Viewport::new(800.0, 600.0, 1.0));
        s.start();
        s
    }

    fn body_clips(p: &RecordingPainter) -> usize {
        p.count(|op| *op == Op::Clip)
    }

    #[test]
    fn test_background_first() {
        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &session(), &AssetSet::empty(), 0.0, true);
        assert_eq!(p.ops[0], Op::FillStyle(SKY.to_owned()));
        assert_eq!(p.ops[1], Op::FillRect(0.0, 0.0, 800.0, 600.0));
        for band in HILL_BANDS {
            assert!(p.has_style(band));
        }
    }

    #[test]
    fn test_hill_bands_descend() {
        let mut p = RecordingPainter::default();
        hills(&mut p, &Viewport::new(800.0, 600.0, 1.0));
        let starts: Vec<f64> = p
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::MoveTo(0.0, y) => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![360.0, 385.0, 410.0, 435.0]);
        // 800 / 40 + 1 curve segments per band
        assert_eq!(p.count(|op| matches!(op, Op::Quad(..))), 4 * 21);
    }

    #[test]
    fn test_only_visible_entities_drawn() {
        let mut s = session();
        s.entities.push(test_entity(
            1,
            EntityKind::Kid,
            DeviceStatus::None,
            DVec2::new(200.0, 200.0),
            100.0,
        ));
        let mut tapped = test_entity(
            2,
            EntityKind::Kid,
            DeviceStatus::None,
            DVec2::new(400.0, 200.0),
            100.0,
        );
        tapped.hit = true;
        s.entities.push(tapped);

        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &s, &AssetSet::empty(), 100.0, true);
        assert_eq!(body_clips(&p), 1);

        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &s, &AssetSet::empty(), 5000.0, true);
        assert_eq!(body_clips(&p), 0);
    }

    #[test]
    fn test_tapped_entity_gone_next_frame() {
        let mut s = session();
        s.entities.push(test_entity(
            9,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        ));
        pointer_down(&mut s, DVec2::new(100.0, 100.0), 10.0);
        s.cull(11.0);
        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &s, &AssetSet::empty(), 11.0, true);
        assert_eq!(body_clips(&p), 0);
        // but the splat is
        assert_eq!(p.count(|op| matches!(op, Op::Ellipse { .. })), 18);
        assert!(p.has_style(GOOD_COLOR));
    }

    #[test]
    fn test_splat_fades_and_expires() {
        let mut s = session();
        let mut rng = Pcg32::seed_from_u64(3);
        s.splats.push(Splat::new(&mut rng, DVec2::new(50.0, 50.0), 0.0, false));
        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &s, &AssetSet::empty(), 100.0, true);
        assert!(p.ops.contains(&Op::Alpha(0.5)));
        assert!(p.has_style(BAD_COLOR));

        let mut p = RecordingPainter::default();
        draw_frame(&mut p, &s, &AssetSet::empty(), 250.0, true);
        assert_eq!(p.count(|op| matches!(op, Op::Ellipse { .. })), 0);
    }

    #[test]
    fn test_splash_has_title() {
        let mut p = RecordingPainter::default();
        draw_splash(&mut p, &Viewport::new(1000.0, 800.0, 1.0));
        assert!(p.texts().contains(&"PAS D'ÉCRAN !"));
        assert!(p.has_style(BAD_COLOR));
        assert!(p.ops.contains(&Op::Translate(105.0, 215.0)));
    }

    #[test]
    fn test_bubble_font_scales_with_viewport() {
        assert_eq!(bubble_font_px(&Viewport::new(1920.0, 1080.0, 1.0)), 32.0);
        assert_eq!(bubble_font_px(&Viewport::new(400.0, 800.0, 1.0)), 12.0);
    }
}
