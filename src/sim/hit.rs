//! Pointer hit testing and tap feedback
//!
//! A tap selects at most one entity: the most recently spawned one whose
//! circular body contains the pointer. Everything else is a silent no-op.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, Session};
use crate::consts::{SPLAT_LIFETIME_MS, SPLAT_MIN_RADIUS, SPLAT_PARTICLES, SPLAT_RADIUS_SPREAD};

/// Classified tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    pub entity_id: u32,
    /// Tapped an unauthorized kid
    pub correct: bool,
}

/// One blob of a splat burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplatParticle {
    /// Offset from the burst center
    pub offset: DVec2,
    /// Ellipse rotation (radians)
    pub angle: f64,
}

/// Particle burst drawn where a tap landed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splat {
    pub center: DVec2,
    pub created: f64,
    pub correct: bool,
    pub particles: Vec<SplatParticle>,
}

impl Splat {
    pub fn new<R: Rng>(rng: &mut R, center: DVec2, now: f64, correct: bool) -> Self {
        let particles = (0..SPLAT_PARTICLES)
            .map(|_| {
                let angle = rng.random::<f64>() * std::f64::consts::TAU;
                let r = SPLAT_MIN_RADIUS + rng.random::<f64>() * SPLAT_RADIUS_SPREAD;
                SplatParticle {
                    offset: DVec2::from_angle(angle) * r,
                    angle,
                }
            })
            .collect();
        Self {
            center,
            created: now,
            correct,
            particles,
        }
    }

    pub fn is_alive(&self, now: f64) -> bool {
        now - self.created < SPLAT_LIFETIME_MS
    }

    /// Fade factor 1 -> 0 over the splat's life
    pub fn alpha(&self, now: f64) -> f64 {
        (1.0 - (now - self.created) / SPLAT_LIFETIME_MS).clamp(0.0, 1.0)
    }
}

/// Index of the topmost visible entity under `point`
fn topmost_at(session: &Session, point: DVec2, now: f64) -> Option<usize> {
    session
        .entities
        .iter()
        .enumerate()
        .rev()
        .find(|(_, e)| e.is_visible(now) && e.contains(point))
        .map(|(i, _)| i)
}

/// Handle a pointer-down at `point` (canvas pixels)
///
/// Ignored unless a round is running. On a hit: bumps the good or bad
/// counter by one, marks the entity hit, queues the feedback events and
/// spawns a splat at the tap location.
pub fn pointer_down(session: &mut Session, point: DVec2, now: f64) -> Option<TapOutcome> {
    if !session.is_running() {
        return None;
    }
    let index = topmost_at(session, point, now)?;
    let entity = session.entities.get_mut(index)?;
    entity.hit = true;
    let outcome = TapOutcome {
        entity_id: entity.id,
        correct: entity.is_target(),
    };

    if outcome.correct {
        session.round.good += 1;
        session.push_event(GameEvent::GoodTap);
    } else {
        session.round.bad += 1;
        session.push_event(GameEvent::BadTap);
    }
    session.push_event(GameEvent::ScoreChanged {
        good: session.round.good,
        bad: session.round.bad,
    });
    log::debug!(
        "Tap on #{} ({}) -> good {}, bad {}",
        outcome.entity_id,
        if outcome.correct { "correct" } else { "wrong" },
        session.round.good,
        session.round.bad
    );

    let splat = Splat::new(&mut session.rng, point, now, outcome.correct);
    session.splats.push(splat);
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{DeviceStatus, EntityKind, test_entity};
    use crate::sim::state::frame;
    use crate::sim::viewport::Viewport;
    use proptest::prelude::*;

    fn session_with(entities: Vec<crate::sim::Entity>) -> Session {
        let mut session = Session::new(42, Viewport::default());
        session.start();
        session.drain_events();
        session.entities = entities;
        session
    }

    #[test]
    fn test_unauthorized_kid_scores_good() {
        let mut session = Session::new(42, Viewport::default());
        let token = session.start();
        session.entities.push(test_entity(
            1000,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        ));
        session.drain_events();

        let outcome = pointer_down(&mut session, DVec2::new(100.0, 100.0), 10.0);
        assert_eq!(
            outcome,
            Some(TapOutcome {
                entity_id: 1000,
                correct: true
            })
        );
        assert_eq!(session.round.good, 1);
        assert_eq!(session.round.bad, 0);
        assert!(session.entities[0].hit);

        let events = session.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GoodTap).count(), 1);
        assert!(!events.contains(&GameEvent::BadTap));

        // Gone on the very next frame
        frame(&mut session, token, 11.0);
        assert!(session.entities.iter().all(|e| e.id != 1000));
    }

    #[test]
    fn test_other_targets_score_bad() {
        let cases = [
            (EntityKind::Kid, DeviceStatus::Authorized),
            (EntityKind::Kid, DeviceStatus::None),
            (EntityKind::Parent, DeviceStatus::None),
        ];
        for (kind, status) in cases {
            let e = test_entity(1, kind, status, DVec2::new(300.0, 300.0), 100.0);
            let mut session = session_with(vec![e]);
            let outcome = pointer_down(&mut session, DVec2::new(320.0, 290.0), 5.0);
            assert_eq!(outcome.map(|o| o.correct), Some(false));
            assert_eq!(session.round.good, 0);
            assert_eq!(session.round.bad, 1);
            assert_eq!(
                session.drain_events().iter().filter(|e| **e == GameEvent::BadTap).count(),
                1
            );
        }
    }

    #[test]
    fn test_miss_leaves_score_unchanged() {
        let e = test_entity(
            1,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        );
        let mut session = session_with(vec![e]);
        assert_eq!(pointer_down(&mut session, DVec2::new(400.0, 400.0), 5.0), None);
        assert_eq!((session.round.good, session.round.bad), (0, 0));
        assert!(!session.entities[0].hit);
        assert!(session.splats.is_empty());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_newest_wins_on_overlap() {
        let older = test_entity(
            1,
            EntityKind::Parent,
            DeviceStatus::None,
            DVec2::new(200.0, 200.0),
            150.0,
        );
        let newer = test_entity(
            2,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(210.0, 200.0),
            150.0,
        );
        let mut session = session_with(vec![older, newer]);
        let outcome = pointer_down(&mut session, DVec2::new(205.0, 200.0), 5.0);
        assert_eq!(outcome.map(|o| o.entity_id), Some(2));
        assert!(!session.entities[0].hit);
        assert!(session.entities[1].hit);
    }

    #[test]
    fn test_one_entity_per_tap() {
        let a = test_entity(
            1,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(200.0, 200.0),
            150.0,
        );
        let b = test_entity(
            2,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(200.0, 200.0),
            150.0,
        );
        let mut session = session_with(vec![a, b]);
        pointer_down(&mut session, DVec2::new(200.0, 200.0), 5.0);
        assert_eq!(session.entities.iter().filter(|e| e.hit).count(), 1);
        assert_eq!(session.round.good, 1);
    }

    #[test]
    fn test_hit_or_expired_entity_is_ignored() {
        let mut tapped = test_entity(
            1,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        );
        tapped.hit = true;
        let mut session = session_with(vec![tapped]);
        assert_eq!(pointer_down(&mut session, DVec2::new(100.0, 100.0), 5.0), None);

        let expired = test_entity(
            2,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        );
        let mut session = session_with(vec![expired]);
        assert_eq!(pointer_down(&mut session, DVec2::new(100.0, 100.0), 5000.0), None);
        assert_eq!((session.round.good, session.round.bad), (0, 0));
    }

    #[test]
    fn test_ignored_when_not_running() {
        let e = test_entity(
            1,
            EntityKind::Kid,
            DeviceStatus::Unauthorized,
            DVec2::new(100.0, 100.0),
            120.0,
        );
        let mut session = Session::new(1, Viewport::default());
        session.entities.push(e);
        assert_eq!(pointer_down(&mut session, DVec2::new(100.0, 100.0), 5.0), None);
        assert_eq!(session.round.good, 0);
    }

    #[test]
    fn test_splat_shape() {
        let e = test_entity(
            1,
            EntityKind::Parent,
            DeviceStatus::None,
            DVec2::new(100.0, 100.0),
            120.0,
        );
        let mut session = session_with(vec![e]);
        pointer_down(&mut session, DVec2::new(90.0, 110.0), 5.0);
        let splat = &session.splats[0];
        assert!(!splat.correct);
        assert_eq!(splat.center, DVec2::new(90.0, 110.0));
        assert_eq!(splat.particles.len(), SPLAT_PARTICLES);
        for p in &splat.particles {
            let r = p.offset.length();
            let max = SPLAT_MIN_RADIUS + SPLAT_RADIUS_SPREAD;
            assert!(r >= SPLAT_MIN_RADIUS - 1e-9 && r < max + 1e-9);
        }
        assert!(splat.is_alive(5.0 + SPLAT_LIFETIME_MS - 1.0));
        assert!(!splat.is_alive(5.0 + SPLAT_LIFETIME_MS));
    }

    proptest! {
        #[test]
        fn tap_inside_radius_always_hits(dx in -59.0f64..59.0, dy in -59.0f64..59.0) {
            prop_assume!((dx * dx + dy * dy).sqrt() <= 60.0);
            let e = test_entity(
                1,
                EntityKind::Kid,
                DeviceStatus::Unauthorized,
                DVec2::new(500.0, 500.0),
                120.0,
            );
            let mut session = session_with(vec![e]);
            let outcome = pointer_down(&mut session, DVec2::new(500.0 + dx, 500.0 + dy), 1.0);
            prop_assert!(outcome.is_some());
            prop_assert_eq!(session.round.good, 1);
        }

        #[test]
        fn newest_overlapping_is_selected(n in 2usize..8) {
            let entities = (0..n as u32)
                .map(|i| {
                    let pos = DVec2::new(300.0, 300.0);
                    test_entity(i + 1, EntityKind::Parent, DeviceStatus::None, pos, 100.0)
                })
                .collect();
            let mut session = session_with(entities);
            let outcome = pointer_down(&mut session, DVec2::new(300.0, 300.0), 1.0);
            prop_assert_eq!(outcome.map(|o| o.entity_id), Some(n as u32));
        }
    }
}
