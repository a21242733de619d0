//! Round lifecycle state machine
//!
//! `Idle -> Running -> Ended`, with `Running` re-entered on every start.
//! Each start mints a new [`RoundToken`]; timers and animation-frame
//! continuations carry the token they were armed with and must stop once it
//! no longer matches.

use serde::{Deserialize, Serialize};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Clock counting down, entities spawning
    Running,
    /// Time ran out (or round was cut short by a restart)
    Ended,
}

/// Handle identifying the round a scheduled continuation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundToken(u64);

impl RoundToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Second elapsed, schedule the next tick
    Continue { remaining: u32 },
    /// Last second elapsed, round is over
    Ended,
    /// Tick belongs to a round that is no longer current; do not reschedule
    Stale,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundClock {
    phase: RoundPhase,
    generation: u64,
}

impl RoundClock {
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Enter `Running` and invalidate every token handed out before
    pub fn start(&mut self) -> RoundToken {
        self.generation = self.generation.wrapping_add(1);
        self.phase = RoundPhase::Running;
        RoundToken(self.generation)
    }

    /// Leave `Running`; outstanding tokens become stale as well
    pub fn stop(&mut self) {
        if self.phase == RoundPhase::Running {
            self.phase = RoundPhase::Ended;
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// True only for the token of the round currently running
    pub fn is_current(&self, token: RoundToken) -> bool {
        self.is_running() && token.0 == self.generation
    }
}
