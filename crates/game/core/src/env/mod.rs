//! Read-only content data and the oracle seam.
//!
//! The engine never hard-codes unit stats, enemy behaviors, decks or
//! encounter layouts; it asks a [`ContentOracle`] for them. Every oracle
//! method has a safe default so missing content degrades to a playable
//! 1 hp / 1 attack baseline instead of failing.

use crate::cards::CardDefinition;
use crate::config::GameConfig;
use crate::state::{Faction, GridPos, SpawnWeight, UnitKind};

/// Shape of an enemy's attack area, evaluated relative to its position and
/// the direction toward its preferred target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackMode {
    /// The four orthogonal neighbors.
    Adjacent4,
    /// All eight neighbors.
    Adjacent8,
    /// A straight line of `attack_range` cells toward the target.
    LinearProjectile,
    /// Three cells ahead: straight plus the two forward diagonals.
    FrontCone,
    /// A fixed cluster of offsets ahead of the unit.
    FrontCluster,
    /// The cells directly above and below.
    VerticalPair,
    /// A ray toward the target that runs to the board edge, stopping at the
    /// first unit hit.
    RayToEdge,
}

/// How an enemy advances across the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveMode {
    /// Greedy axis-aligned steps, up to `move_range` per turn.
    Step,
    /// Knight-style leaps.
    Leap,
    /// Straight flight toward the target ignoring intermediate occupancy;
    /// only the destination must be free.
    Fly,
}

/// Per-kind movement and attack behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyBehavior {
    pub attack_mode: AttackMode,
    pub attack_range: i32,
    pub move_mode: MoveMode,
    pub move_range: i32,
}

impl Default for EnemyBehavior {
    fn default() -> Self {
        Self {
            attack_mode: AttackMode::Adjacent4,
            attack_range: 1,
            move_mode: MoveMode::Step,
            move_range: 1,
        }
    }
}

/// Special-ability effects, dispatched by the encounter executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEffect {
    /// Next-attack debuff to every player unit sharing the nearest player's
    /// row or column.
    Shriek,
    /// Next-attack buff to all Coyotes when at least two are alive.
    PackHowl,
    /// Damage plus root on the nearest player unit.
    WebTrap,
    /// Damage to all eight neighbors.
    SuperLeap,
    /// Poison over a 2x2 zone ahead of the unit.
    StenchMissile,
    /// The unit's next attack also puts its victims to sleep.
    SleepVenom,
    /// Permanent attack increase.
    Enrage,
    /// The unit's next attack heals it for the damage dealt.
    Rend,
    /// Every Coyote steps toward its nearest player unit.
    AlphaCall,
    /// Next-attack buff when exactly two cells from the nearest player unit.
    Lunge,
}

/// A special ability with its trigger chance and magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpecial {
    pub effect: SpecialEffect,
    /// Trigger chance per turn, 0..=100.
    pub chance_percent: u32,
    /// Damage, buff size or heal amount depending on the effect.
    pub amount: i32,
    /// Duration for root/sleep/poison effects.
    pub turns: u8,
}

/// Baseline combat stats for a unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitProfile {
    pub max_hp: i32,
    pub attack: i32,
}

impl Default for UnitProfile {
    fn default() -> Self {
        Self {
            max_hp: GameConfig::DEFAULT_HP,
            attack: GameConfig::DEFAULT_ATTACK,
        }
    }
}

/// A unit placed at encounter start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub kind: UnitKind,
    pub faction: Faction,
    pub pos: GridPos,
}

/// Static description of a cave spawner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaveTemplate {
    pub pos: GridPos,
    pub spawn_interval: u32,
    pub spawn_charges: u32,
    pub max_alive: u32,
    pub pool: Vec<SpawnWeight>,
}

/// Everything needed to set up one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterTemplate {
    pub board_size: i32,
    pub enemies: Vec<Placement>,
    /// Player units beyond the King, which always spawns.
    pub player_extras: Vec<Placement>,
    pub caves: Vec<CaveTemplate>,
}

/// Read-only content tables the engine consults.
///
/// Defaults make an oracle that overrides nothing still produce a playable
/// encounter: every unit at 1/1, plain adjacent melee, empty deck, a bare
/// default-sized board.
pub trait ContentOracle: Send + Sync {
    fn unit_profile(&self, _kind: UnitKind) -> UnitProfile {
        UnitProfile::default()
    }

    fn enemy_behavior(&self, _kind: UnitKind) -> EnemyBehavior {
        EnemyBehavior::default()
    }

    fn enemy_special(&self, _kind: UnitKind) -> Option<EnemySpecial> {
        None
    }

    fn rules(&self) -> GameConfig {
        GameConfig::default()
    }

    fn starter_deck(&self) -> Vec<CardDefinition> {
        Vec::new()
    }

    fn encounter(&self, _node_id: &str) -> Option<EncounterTemplate> {
        None
    }
}

/// Oracle that answers everything with defaults. Useful as a test double and
/// as the degraded-content fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContent;

impl ContentOracle for EmptyContent {}
