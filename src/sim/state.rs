//! Round session state and the per-frame step
//!
//! Everything a round mutates is owned by one [`Session`]; the front end
//! holds it and passes it by reference to the frame step, the hit tester
//! and the countdown.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{RoundClock, RoundPhase, RoundToken, TickOutcome};
use super::entity::Entity;
use super::hit::Splat;
use super::spawner::{SpawnGate, should_spawn, spawn_entity};
use super::viewport::Viewport;
use crate::consts::ROUND_SECONDS;

/// Time left and score of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Whole seconds left on the clock
    pub remaining: u32,
    /// Correct taps
    pub good: u32,
    /// Wrong taps
    pub bad: u32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            remaining: ROUND_SECONDS,
            good: 0,
            bad: 0,
        }
    }
}

/// Score shown when the clock runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub good: u32,
    pub bad: u32,
}

/// Notifications for the audio and label collaborators, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Labels should be reset to a fresh round
    RoundStarted,
    TimeChanged { remaining: u32 },
    ScoreChanged { good: u32, bad: u32 },
    /// Correct tap, play the good blip
    GoodTap,
    /// Wrong tap, play the bad blip
    BadTap,
    /// Clock ran out
    RoundOver(RoundSummary),
}

/// One player's game: clock, score, active entities and effects
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the generator was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub round: RoundState,
    pub viewport: Viewport,
    /// Active entities in spawn order (newest last, drawn on top)
    pub entities: Vec<Entity>,
    /// Live splat bursts
    pub splats: Vec<Splat>,
    clock: RoundClock,
    spawn_gate: SpawnGate,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            round: RoundState::default(),
            viewport,
            entities: Vec::new(),
            splats: Vec::new(),
            clock: RoundClock::default(),
            spawn_gate: SpawnGate::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.clock.phase()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Whether a continuation armed with `token` may still act
    pub fn is_current(&self, token: RoundToken) -> bool {
        self.clock.is_current(token)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// New canvas size; only entities spawned from now on use it
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Reset the round and enter `Running`
    ///
    /// The returned token must be handed to the animation loop and the
    /// countdown; anything armed for an earlier round is stale from here on.
    pub fn start(&mut self) -> RoundToken {
        self.round = RoundState::default();
        self.entities.clear();
        self.splats.clear();
        self.spawn_gate.reset();
        let token = self.clock.start();
        log::info!(
            "Round {} started ({}s)",
            token.generation(),
            self.round.remaining
        );
        self.events.push(GameEvent::RoundStarted);
        self.events.push(GameEvent::TimeChanged {
            remaining: self.round.remaining,
        });
        self.events.push(GameEvent::ScoreChanged { good: 0, bad: 0 });
        token
    }

    /// Cut the current round short (no summary) and start a fresh one
    pub fn restart(&mut self) -> RoundToken {
        if self.is_running() {
            log::info!(
                "Restart: abandoning round at {}s (good {}, bad {})",
                self.round.remaining,
                self.round.good,
                self.round.bad
            );
        }
        self.clock.stop();
        self.start()
    }

    /// One-second countdown step
    pub fn countdown_tick(&mut self, token: RoundToken) -> TickOutcome {
        if !self.clock.is_current(token) {
            return TickOutcome::Stale;
        }
        self.round.remaining = self.round.remaining.saturating_sub(1);
        self.events.push(GameEvent::TimeChanged {
            remaining: self.round.remaining,
        });
        if self.round.remaining > 0 {
            return TickOutcome::Continue {
                remaining: self.round.remaining,
            };
        }

        self.clock.stop();
        let summary = RoundSummary {
            good: self.round.good,
            bad: self.round.bad,
        };
        log::info!("Round over: good {}, bad {}", summary.good, summary.bad);
        self.events.push(GameEvent::RoundOver(summary));
        TickOutcome::Ended
    }

    /// Drop entities that expired or were tapped, and finished splats
    pub fn cull(&mut self, now: f64) {
        self.entities.retain(|e| e.is_visible(now));
        self.splats.retain(|s| s.is_alive(now));
    }

    /// Spawner step: gate, population cap, then the spawn roll
    pub fn maybe_spawn(&mut self, now: f64) -> bool {
        if !self.spawn_gate.ready(now) {
            return false;
        }
        if !should_spawn(&mut self.rng, self.entities.len()) {
            return false;
        }
        let id = self.next_entity_id();
        let entity = spawn_entity(&mut self.rng, &self.viewport, now, id);
        log::trace!("Spawned {:?} #{} at {:?}", entity.kind, entity.id, entity.pos);
        self.entities.push(entity);
        true
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Advance one animation frame
///
/// Returns false when the loop must not be rescheduled (round no longer
/// running, or `token` belongs to an older round).
pub fn frame(session: &mut Session, token: RoundToken, now: f64) -> bool {
    if !session.is_current(token) {
        return false;
    }
    session.cull(now);
    session.maybe_spawn(now);
    true
}
