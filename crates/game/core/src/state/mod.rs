//! Core state types: board, units, hazards, turn and run-level session.
//!
//! Everything here is plain deterministic data. Mutation entry points live on
//! the owning aggregates (`BoardState`, `TurnState`, `SessionState`); the
//! encounter layer composes them and emits events.

pub mod board;
pub mod common;
pub mod hazard;
pub mod session;
pub mod turn;
pub mod unit;

pub use board::BoardState;
pub use common::{Faction, GridPos};
pub use hazard::{CaveId, CaveState, SpawnWeight, TrapState};
pub use session::{NodeType, RunNode, SessionState};
pub use turn::{TurnPhase, TurnState};
pub use unit::{ActionFlags, Unit, UnitId, UnitKind, UnitStatus};
