//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must stay free of web APIs:
//! - Time is passed in as milliseconds, never read from a clock
//! - Seeded RNG only
//! - Active entities kept in spawn order (newest last)

pub mod clock;
pub mod entity;
pub mod hit;
pub mod spawner;
pub mod state;
pub mod viewport;

pub use clock::{RoundPhase, RoundToken, TickOutcome};
pub use entity::{BUBBLE_LINES, DeviceArt, DeviceStatus, Entity, EntityKind};
pub use hit::{Splat, SplatParticle, TapOutcome, pointer_down};
pub use spawner::{SpawnGate, spawn_entity};
pub use state::{GameEvent, RoundState, RoundSummary, Session, frame};
pub use viewport::Viewport;
