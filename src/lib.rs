//! No Screens - a canvas reaction-time arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (spawning, lifetimes, hit testing, clock)
//! - `renderer`: Canvas2D-shaped drawing of the scene
//! - `assets`: Optional portrait/device images with placeholder fallback
//! - `audio`: Web Audio feedback blips (browser only)
//! - `settings`: Persisted player preferences

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::AssetSet;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Round length in whole seconds
    pub const ROUND_SECONDS: u32 = 120;
    /// Countdown tick period (ms)
    pub const COUNTDOWN_INTERVAL_MS: i32 = 1000;

    /// Minimum wall time between spawn attempts (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 500.0;
    /// Spawning is skipped once this many entities are active
    pub const MAX_ACTIVE: usize = 5;
    /// Chance that an eligible spawn attempt actually spawns
    pub const SPAWN_CHANCE: f64 = 0.9;
    /// Chance that a spawn is a kid (otherwise a parent)
    pub const KID_CHANCE: f64 = 0.65;
    /// Kid device roll below this is unauthorized
    pub const UNAUTHORIZED_BELOW: f64 = 0.5;
    /// Kid device roll below this (and above the previous) is authorized
    pub const AUTHORIZED_BELOW: f64 = 0.75;
    /// Chance that an entity carries a speech bubble
    pub const BUBBLE_CHANCE: f64 = 0.25;

    /// Entity lifespan = base + U[0, spread) ms
    pub const LIFESPAN_BASE_MS: f64 = 1100.0;
    pub const LIFESPAN_SPREAD_MS: f64 = 900.0;

    /// Entity size = max(min, min(W, H) * factor) * U[0.85, 1.15)
    pub const SIZE_MIN: f64 = 90.0;
    pub const SIZE_FACTOR: f64 = 0.18;
    pub const SIZE_JITTER_LOW: f64 = 0.85;
    pub const SIZE_JITTER_SPAN: f64 = 0.3;

    /// Keep spawns away from the left/right/bottom edges
    pub const SPAWN_MARGIN: f64 = 90.0;
    /// Band at the top reserved for the score/time labels
    pub const UI_RESERVE: f64 = 120.0;

    /// Device pixel ratio is never taken above this
    pub const MAX_DPR: f64 = 2.0;

    /// Breathing wobble
    pub const WOBBLE_AMPLITUDE: f64 = 4.0;
    pub const WOBBLE_PERIOD_MS: f64 = 120.0;

    /// Splat burst
    pub const SPLAT_PARTICLES: usize = 18;
    pub const SPLAT_MIN_RADIUS: f64 = 10.0;
    pub const SPLAT_RADIUS_SPREAD: f64 = 30.0;
    pub const SPLAT_LIFETIME_MS: f64 = 200.0;

    /// Palette
    pub const SKY: &str = "#72d6ff";
    pub const HILL_BANDS: [&str; 4] = ["#c7f36f", "#9fe24f", "#67c91a", "#2ea01a"];
    pub const GOOD_COLOR: &str = "#22c55e";
    pub const BAD_COLOR: &str = "#ff3e3e";
    pub const DEVICE_RED: &str = "#ff2b2b";
    pub const PARENT_OUTLINE: &str = "#ba2020";
}
