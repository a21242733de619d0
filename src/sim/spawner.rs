//! Spawn gating and the weighted spawn policy

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{
    BUBBLE_LINES, DeviceArt, DeviceStatus, Entity, EntityKind, KID_PORTRAITS, PARENT_PORTRAITS,
};
use super::viewport::Viewport;
use crate::consts::*;

/// Wall-clock gate: opens at most once per [`SPAWN_INTERVAL_MS`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnGate {
    last: Option<f64>,
}

impl SpawnGate {
    /// Re-arm so the next frame is eligible
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Returns true (and consumes the interval) when a spawn attempt is due
    pub fn ready(&mut self, now: f64) -> bool {
        match self.last {
            Some(last) if now - last <= SPAWN_INTERVAL_MS => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Decide whether an eligible tick spawns, given the current population
///
/// Spawning is skipped outright at or above the cap; below it, the
/// [`SPAWN_CHANCE`] roll decides.
pub fn should_spawn<R: Rng>(rng: &mut R, active: usize) -> bool {
    if active >= MAX_ACTIVE {
        return false;
    }
    rng.random::<f64>() < SPAWN_CHANCE
}

/// Uniform pick from a non-empty table
fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len())).copied()
}

/// Uniform point inside the spawn area (below the UI band, inside the margin)
pub fn random_position<R: Rng>(rng: &mut R, viewport: &Viewport) -> DVec2 {
    let (origin, extent) = viewport.spawn_area();
    DVec2::new(
        origin.x + rng.random::<f64>() * extent.x,
        origin.y + rng.random::<f64>() * extent.y,
    )
}

/// Body diameter for the current viewport
pub fn random_size<R: Rng>(rng: &mut R, viewport: &Viewport) -> f64 {
    let base = (viewport.min_side() * SIZE_FACTOR).max(SIZE_MIN);
    base * (SIZE_JITTER_LOW + rng.random::<f64>() * SIZE_JITTER_SPAN)
}

/// Create one entity following the weighted spawn policy
pub fn spawn_entity<R: Rng>(rng: &mut R, viewport: &Viewport, now: f64, id: u32) -> Entity {
    let (kind, status, device) = if rng.random::<f64>() < KID_CHANCE {
        let roll = rng.random::<f64>();
        if roll < UNAUTHORIZED_BELOW {
            (EntityKind::Kid, DeviceStatus::Unauthorized, pick(rng, &DeviceArt::FORBIDDEN))
        } else if roll < AUTHORIZED_BELOW {
            (EntityKind::Kid, DeviceStatus::Authorized, pick(rng, &DeviceArt::ALLOWED))
        } else {
            (EntityKind::Kid, DeviceStatus::None, None)
        }
    } else {
        (EntityKind::Parent, DeviceStatus::None, None)
    };

    let portraits = match kind {
        EntityKind::Kid => KID_PORTRAITS,
        EntityKind::Parent => PARENT_PORTRAITS,
    };
    let portrait = rng.random_range(0..portraits);
    let pos = random_position(rng, viewport);
    let size = random_size(rng, viewport);
    let lifespan = LIFESPAN_BASE_MS + rng.random::<f64>() * LIFESPAN_SPREAD_MS;
    let bubble = if rng.random::<f64>() < BUBBLE_CHANCE {
        pick(rng, &BUBBLE_LINES).map(str::to_owned)
    } else {
        None
    };

    Entity {
        id,
        kind,
        portrait,
        pos,
        size,
        created: now,
        lifespan,
        status,
        device,
        bubble,
        hit: false,
    }
}
