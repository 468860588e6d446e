//! Encounter event stream.
//!
//! The engine pushes events onto an internal queue as it mutates state; the
//! presentation layer drains them once per command. Queue order matches
//! mutation order, so a consumer replaying events with its own pacing sees
//! exactly the sequence the simulation performed.

use std::collections::VecDeque;

use crate::state::{GridPos, TurnPhase, UnitId, UnitKind};

/// Everything observable about an encounter, in occurrence order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterEvent {
    PhaseChanged {
        phase: TurnPhase,
        round: u32,
    },
    UnitMoved {
        unit: UnitId,
        from: GridPos,
        to: GridPos,
    },
    AttackStarted {
        attacker: UnitId,
        squares: Vec<GridPos>,
    },
    AttackResolved {
        attacker: UnitId,
    },
    SpecialTriggered {
        actor: UnitId,
        description: String,
    },
    DamageDealt {
        unit: UnitId,
        amount: i32,
    },
    UnitSpawned {
        unit: UnitId,
        at: GridPos,
    },
    UnitPromoted {
        unit: UnitId,
    },
    TrapTriggered {
        at: GridPos,
        victim: UnitId,
    },
    CardEffectApplied {
        card_id: String,
        at: Option<GridPos>,
    },
    HandChanged,
    IntentsRebuilt,
    /// User-facing feedback for rejected commands ("Not enough energy", ...).
    Message {
        text: String,
    },
    UnitSummoned {
        kind: UnitKind,
        at: GridPos,
    },
    EncounterResolved {
        won: bool,
        node_id: String,
    },
}

/// FIFO queue the encounter controller appends to and consumers drain.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<EncounterEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: EncounterEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<EncounterEvent> {
        self.events.pop_front()
    }

    /// Drains every queued event in occurrence order.
    pub fn drain(&mut self) -> Vec<EncounterEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
