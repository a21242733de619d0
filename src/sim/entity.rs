//! On-screen targets and their timed life

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Number of kid portraits in the asset table
pub const KID_PORTRAITS: usize = 5;
/// Number of parent portraits in the asset table
pub const PARENT_PORTRAITS: usize = 2;

/// Speech-bubble lines an entity may carry
pub const BUBBLE_LINES: [&str; 11] = [
    "Juste 5 minutes...",
    "Qui a pris le chargeur ?",
    "Je fais mes devoirs !",
    "Mode avion c’est bien !",
    "Papaaaaa...",
    "Promis j’arrête.",
    "C’est éducatif !",
    "Regarde ce mème !",
    "Pas d’écran !",
    "Mais c’est pour la science !",
    "Team clavier-souris !",
];

/// What was spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Kid,
    /// Always angry, never holds a device
    Parent,
}

/// Device classification of a kid (parents are always `None`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Unauthorized,
    Authorized,
    None,
}

/// Device artwork variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceArt {
    Phone,
    Tablet,
    Tv,
    PhoneChecked,
    TabletChecked,
}

impl DeviceArt {
    pub const ALL: [DeviceArt; 5] = [
        DeviceArt::Phone,
        DeviceArt::Tablet,
        DeviceArt::Tv,
        DeviceArt::PhoneChecked,
        DeviceArt::TabletChecked,
    ];
    /// Devices an unauthorized kid may hold
    pub const FORBIDDEN: [DeviceArt; 3] = [DeviceArt::Phone, DeviceArt::Tablet, DeviceArt::Tv];
    /// Devices an authorized kid may hold
    pub const ALLOWED: [DeviceArt; 2] = [DeviceArt::PhoneChecked, DeviceArt::TabletChecked];

    pub fn index(self) -> usize {
        match self {
            DeviceArt::Phone => 0,
            DeviceArt::Tablet => 1,
            DeviceArt::Tv => 2,
            DeviceArt::PhoneChecked => 3,
            DeviceArt::TabletChecked => 4,
        }
    }
}

/// A spawned, time-limited target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Index into the kid or parent portrait table
    pub portrait: usize,
    /// Center in canvas pixel space
    pub pos: DVec2,
    /// Diameter of the drawn body and of the hit region
    pub size: f64,
    /// Spawn timestamp (ms)
    pub created: f64,
    /// Time on screen (ms)
    pub lifespan: f64,
    pub status: DeviceStatus,
    /// Artwork for the held device, if any
    pub device: Option<DeviceArt>,
    pub bubble: Option<String>,
    pub hit: bool,
}

impl Entity {
    /// Visible iff still within its lifespan and not yet tapped.
    ///
    /// Both conditions only ever flip one way, so once this returns false
    /// for some `now` it stays false for every later `now`.
    pub fn is_visible(&self, now: f64) -> bool {
        now - self.created < self.lifespan && !self.hit
    }

    /// The only correct tap target: a kid with an unauthorized device
    pub fn is_target(&self) -> bool {
        self.kind == EntityKind::Kid && self.status == DeviceStatus::Unauthorized
    }

    /// Hit region radius (half the drawn size)
    pub fn radius(&self) -> f64 {
        self.size * 0.5
    }

    /// Circular hit region containing `point`
    pub fn contains(&self, point: DVec2) -> bool {
        self.pos.distance(point) <= self.radius()
    }

    /// Milliseconds since spawn
    pub fn age(&self, now: f64) -> f64 {
        now - self.created
    }
}

#[cfg(test)]
pub(crate) fn test_entity(
    id: u32,
    kind: EntityKind,
    status: DeviceStatus,
    pos: DVec2,
    size: f64,
) -> Entity {
    Entity {
        id,
        kind,
        portrait: 0,
        pos,
        size,
        created: 0.0,
        lifespan: 1500.0,
        status,
        device: None,
        bubble: None,
        hit: false,
    }
}
