//! Deterministic grid-tactics combat engine.
//!
//! `tactics-core` implements the headless simulation for a chess-like tactics
//! game: the board and unit model, per-kind movement and attack geometry, the
//! enemy intent planner, and the encounter orchestration that drives one
//! battle from setup to win or loss. All state mutation flows through
//! [`encounter::EncounterController`]; content (stats, behaviors, decks,
//! encounter layouts) arrives through the [`env::ContentOracle`] seam so the
//! engine itself ships no data tables.
//!
//! The crate is pure and synchronous. Given the same session seed and the
//! same command sequence, an encounter replays identically.
pub mod cards;
pub mod config;
pub mod encounter;
pub mod env;
pub mod events;
pub mod planner;
pub mod rng;
pub mod rules;
pub mod state;

pub use cards::{CardDefinition, CardKind, CardPlaySink, DeckState};
pub use config::GameConfig;
pub use encounter::{CommandError, EncounterController};
pub use env::{
    AttackMode, CaveTemplate, ContentOracle, EmptyContent, EncounterTemplate, EnemyBehavior,
    EnemySpecial, MoveMode, Placement, SpecialEffect, UnitProfile,
};
pub use events::{EncounterEvent, EventQueue};
pub use planner::{EnemyIntent, EnemyPlan, IntentKind, IntentPlanner, PlannerWeights};
pub use rng::{PcgRng, SessionRng, mix_seed};
pub use state::{
    ActionFlags, BoardState, CaveId, CaveState, Faction, GridPos, NodeType, RunNode, SessionState,
    SpawnWeight, TrapState, TurnPhase, TurnState, Unit, UnitId, UnitKind, UnitStatus,
};
