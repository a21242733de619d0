//! Entity drawing: body, outline, device overlays, badges and speech bubbles

use crate::assets::AssetSet;
use crate::consts::{
    BAD_COLOR, DEVICE_RED, GOOD_COLOR, PARENT_OUTLINE, WOBBLE_AMPLITUDE, WOBBLE_PERIOD_MS,
};
use crate::sim::entity::{DeviceStatus, Entity, EntityKind};

use super::{Painter, TextAlign, TextBaseline};

const SHADOW: &str = "rgba(0,0,0,0.25)";
const SKIN: &str = "#ffdbb5";
const HAIR: &str = "#8b5a2b";
const INK: &str = "#000";
const PAPER: &str = "#fff";

/// Horizontal "breathing" offset for an entity of the given age (ms)
pub fn wobble(age: f64) -> f64 {
    (age / WOBBLE_PERIOD_MS).sin() * WOBBLE_AMPLITUDE
}

/// Draw one entity
///
/// `bubble_font_px` is the speech-bubble font size for the current viewport;
/// `animate` turns the breathing wobble on.
pub fn draw_entity<P: Painter>(
    p: &mut P,
    e: &Entity,
    assets: &AssetSet<P::Image>,
    now: f64,
    bubble_font_px: f64,
    animate: bool,
) {
    let s = e.size;
    let wob = if animate { wobble(e.age(now)) } else { 0.0 };
    let x = e.pos.x + wob;
    let y = e.pos.y;

    // Flattened ground shadow (does not wobble)
    p.save();
    p.translate(e.pos.x, y + s * 0.55);
    p.scale(1.0, 0.35);
    p.set_fill_style(SHADOW);
    p.begin_path();
    p.circle(0.0, 0.0, s * 0.45);
    p.fill();
    p.restore();

    // Body clipped to a circle
    p.save();
    p.translate(x, y);
    p.begin_path();
    p.circle(0.0, 0.0, s * 0.5);
    p.close_path();
    p.clip();
    match assets.portrait(e.kind, e.portrait) {
        Some(img) => p.draw_image(img, -s * 0.5, -s * 0.5, s, s),
        None => placeholder_face(p, s),
    }
    p.restore();

    p.set_line_width((s * 0.06).max(6.0));
    p.set_stroke_style(match e.kind {
        EntityKind::Parent => PARENT_OUTLINE,
        EntityKind::Kid => INK,
    });
    p.begin_path();
    p.circle(x, y, s * 0.5);
    p.stroke();

    match (e.kind, e.status) {
        (EntityKind::Kid, DeviceStatus::Unauthorized) => {
            device(p, e, assets, x, y, DEVICE_RED);
            band(p, x, y + s * 0.25, s * 0.6, DEVICE_RED);
        }
        (EntityKind::Kid, DeviceStatus::Authorized) => {
            device(p, e, assets, x, y, GOOD_COLOR);
            badge(p, x + s * 0.27, y - s * 0.27, s * 0.22, GOOD_COLOR, "OK");
        }
        (EntityKind::Kid, DeviceStatus::None) => {}
        (EntityKind::Parent, _) => {
            badge(p, x + s * 0.27, y - s * 0.27, s * 0.22, BAD_COLOR, "GRR");
        }
    }

    if let Some(text) = &e.bubble {
        speech_bubble(p, x + s * 0.55, y - s * 0.55, text, bubble_font_px);
    }
}

/// Cartoon face used when the portrait is missing
fn placeholder_face<P: Painter>(p: &mut P, s: f64) {
    p.set_fill_style(SKIN);
    p.fill_rect(-s * 0.5, -s * 0.5, s, s);
    p.set_fill_style(INK);
    p.begin_path();
    p.circle(-s * 0.17, -s * 0.05, s * 0.06);
    p.circle(s * 0.17, -s * 0.05, s * 0.06);
    p.fill();
    p.fill_rect(-s * 0.18, s * 0.15, s * 0.36, s * 0.06);
    p.set_fill_style(HAIR);
    p.fill_rect(-s * 0.5, -s * 0.5, s, s * 0.25);
}

/// Held device: artwork if loaded, otherwise a tilted phone outline in `color`
fn device<P: Painter>(
    p: &mut P,
    e: &Entity,
    assets: &AssetSet<P::Image>,
    x: f64,
    y: f64,
    color: &str,
) {
    let s = e.size;
    match e.device.and_then(|d| assets.device(d)) {
        Some(img) => p.draw_image(img, x - s * 0.15, y + s * 0.15, s * 0.5, s * 0.5),
        None => device_placeholder(p, x, y + s * 0.25, s * 0.5, color),
    }
}

fn device_placeholder<P: Painter>(p: &mut P, cx: f64, cy: f64, size: f64, color: &str) {
    p.save();
    p.translate(cx, cy);
    p.rotate(-0.2);
    p.set_fill_style(INK);
    p.fill_rect(-size * 0.25 - 3.0, -size * 0.35 - 3.0, size * 0.5 + 6.0, size * 0.7 + 6.0);
    p.set_fill_style(PAPER);
    p.fill_rect(-size * 0.25, -size * 0.35, size * 0.5, size * 0.7);
    // status stripe
    p.set_fill_style(color);
    p.fill_rect(-size * 0.25, size * 0.05, size * 0.5, size * 0.12);
    p.restore();
}

/// Round badge with a short label
fn badge<P: Painter>(p: &mut P, cx: f64, cy: f64, r: f64, color: &str, text: &str) {
    p.save();
    p.set_fill_style(color);
    p.set_stroke_style(INK);
    p.set_line_width(r * 0.25);
    p.begin_path();
    p.circle(cx, cy, r);
    p.fill();
    p.stroke();
    p.set_fill_style(INK);
    p.set_font(&format!("{}px Arial Black", (r * 0.95).floor()));
    p.set_text_align(TextAlign::Center);
    p.set_text_baseline(TextBaseline::Middle);
    p.fill_text(text, cx, cy + 1.0);
    p.restore();
}

/// Tilted "forbidden" banner across the device
fn band<P: Painter>(p: &mut P, cx: f64, cy: f64, w: f64, color: &str) {
    p.save();
    p.translate(cx, cy);
    p.rotate(-0.5);
    p.set_fill_style(color);
    p.set_stroke_style(INK);
    p.set_line_width(6.0);
    p.fill_rect(-w / 2.0, -12.0, w, 24.0);
    p.stroke_rect(-w / 2.0, -12.0, w, 24.0);
    p.restore();
}

/// Rounded bubble whose bottom-right corner sits at (x, y), sized to its text
pub fn speech_bubble<P: Painter>(p: &mut P, x: f64, y: f64, text: &str, font_px: f64) {
    const PADDING: f64 = 10.0;
    const RADIUS: f64 = 12.0;

    p.save();
    p.set_font(&format!("{}px Comic Sans MS", font_px.floor()));
    let w = p.measure_text(text) + PADDING * 2.0;
    let h = font_px.floor() + PADDING * 1.6;
    p.translate(x, y);
    p.set_fill_style(PAPER);
    p.set_stroke_style(INK);
    p.set_line_width(4.0);
    p.rounded_rect(-w, -h, w, h, RADIUS);
    p.fill();
    p.stroke();

    // pointer
    p.begin_path();
    p.move_to(-10.0, -2.0);
    p.line_to(-24.0, 8.0);
    p.line_to(-2.0, 6.0);
    p.close_path();
    p.fill();
    p.stroke();

    p.set_fill_style(INK);
    p.set_text_align(TextAlign::Left);
    p.set_text_baseline(TextBaseline::Top);
    p.fill_text(text, -w + PADDING, -h + PADDING);
    p.restore();
}
