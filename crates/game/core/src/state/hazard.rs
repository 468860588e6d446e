use std::fmt;

use super::common::GridPos;
use super::unit::UnitKind;

/// Identifier for a cave structure, used as a weak back-reference on units it
/// spawned so the per-cave alive cap can be enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveId(pub u32);

impl fmt::Display for CaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cave#{}", self.0)
    }
}

/// One-shot floor trap placed by a card.
///
/// Triggers when an enemy unit ends the enemy turn standing on it, then is
/// consumed. Player units never trigger traps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapState {
    pub pos: GridPos,
    pub damage: i32,
    pub sleep_turns: u8,
}

/// Entry in a cave's weighted spawn pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnWeight {
    pub kind: UnitKind,
    pub weight: u32,
}

/// Runtime state of a cave spawner.
///
/// Counts down once per enemy turn; at zero it spawns a weighted pick into the
/// first free orthogonal neighbor, spends a charge and resets the countdown.
/// A cave blocked by its alive cap keeps retrying on later turns without
/// spending anything.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveState {
    pub id: CaveId,
    pub pos: GridPos,
    pub turns_until_next_spawn: u32,
    pub spawn_interval: u32,
    pub spawn_charges: u32,
    pub max_alive: u32,
    pub pool: Vec<SpawnWeight>,
}

impl CaveState {
    pub fn exhausted(&self) -> bool {
        self.spawn_charges == 0
    }

    pub fn total_weight(&self) -> u32 {
        self.pool.iter().map(|w| w.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_weight_sums_pool() {
        let cave = CaveState {
            id: CaveId(1),
            pos: GridPos::new(0, 0),
            turns_until_next_spawn: 2,
            spawn_interval: 2,
            spawn_charges: 3,
            max_alive: 2,
            pool: vec![
                SpawnWeight { kind: UnitKind::Bat, weight: 3 },
                SpawnWeight { kind: UnitKind::Spider, weight: 1 },
            ],
        };
        assert_eq!(cave.total_weight(), 4);
        assert!(!cave.exhausted());
    }
}
