use std::fmt;

use bitflags::bitflags;

use super::common::{Faction, GridPos};

/// Every unit kind that can occupy a board cell.
///
/// The first six are the player-side chess pieces; the wildlife kinds are
/// enemies with data-driven attack shapes; Rock and Cave are structures that
/// never act.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    King,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    Bat,
    Coyote,
    Owl,
    Boar,
    Snake,
    Spider,
    Skunk,
    WolfAlpha,
    Bear,
    Toad,
    WolfPup,
    Rock,
    Cave,
}

impl UnitKind {
    /// Structures occupy a cell but never take turns and are never planned for.
    pub fn is_structure(self) -> bool {
        matches!(self, UnitKind::Rock | UnitKind::Cave)
    }

    pub fn is_chess_piece(self) -> bool {
        matches!(
            self,
            UnitKind::King
                | UnitKind::Pawn
                | UnitKind::Knight
                | UnitKind::Bishop
                | UnitKind::Rook
                | UnitKind::Queen
        )
    }
}

/// Unique identifier for a unit, derived from faction + kind + spawn serial.
///
/// The derived `Ord` gives the stable ascending order the intent planner
/// iterates in; serials are unique per encounter so two units never compare
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId {
    pub faction: Faction,
    pub kind: UnitKind,
    pub serial: u32,
}

impl UnitId {
    pub const fn new(faction: Faction, kind: UnitKind, serial: u32) -> Self {
        Self {
            faction,
            kind,
            serial,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.faction, self.kind, self.serial)
    }
}

bitflags! {
    /// Per-unit action availability, reset at the start of every player phase.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionFlags: u8 {
        const CAN_MOVE = 1 << 0;
        const CAN_ATTACK = 1 << 1;
    }
}

/// Status block tracked per unit.
///
/// Durations are decremented once per owning faction's turn tick; `promoted`
/// is sticky and never unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStatus {
    pub sleeping_turns: u8,
    pub rooted_turns: u8,
    pub poisoned_turns: u8,
    pub shield_charge: u8,
    /// One-shot damage modifier consumed by the unit's next attack.
    pub next_attack_modifier: i32,
    pub promoted: bool,
}

impl UnitStatus {
    pub fn is_sleeping(&self) -> bool {
        self.sleeping_turns > 0
    }

    pub fn is_rooted(&self) -> bool {
        self.rooted_turns > 0
    }

    /// Consumes and returns the one-shot attack modifier.
    pub fn take_attack_modifier(&mut self) -> i32 {
        std::mem::take(&mut self.next_attack_modifier)
    }
}

/// Runtime state of a single unit. Owned exclusively by the board once added.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: Faction,
    pub pos: GridPos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub flags: ActionFlags,
    pub is_structure: bool,
    /// Weak back-reference to the cave that spawned this unit, if any.
    pub spawned_by: Option<super::hazard::CaveId>,
    pub status: UnitStatus,
}

impl Unit {
    pub fn new(id: UnitId, pos: GridPos, max_hp: i32, attack: i32) -> Self {
        let flags = if id.faction == Faction::Player {
            ActionFlags::CAN_MOVE | ActionFlags::CAN_ATTACK
        } else {
            ActionFlags::empty()
        };
        Self {
            id,
            kind: id.kind,
            faction: id.faction,
            pos,
            hp: max_hp,
            max_hp,
            attack,
            flags,
            is_structure: id.kind.is_structure(),
            spawned_by: None,
            status: UnitStatus::default(),
        }
    }

    pub fn can_move(&self) -> bool {
        self.flags.contains(ActionFlags::CAN_MOVE)
            && !self.status.is_rooted()
            && !self.status.is_sleeping()
    }

    pub fn can_attack(&self) -> bool {
        self.flags.contains(ActionFlags::CAN_ATTACK) && !self.status.is_sleeping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ids_order_by_faction_kind_serial() {
        let a = UnitId::new(Faction::Player, UnitKind::King, 1);
        let b = UnitId::new(Faction::Enemy, UnitKind::Bat, 2);
        let c = UnitId::new(Faction::Enemy, UnitKind::Bat, 3);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn player_units_start_ready() {
        let id = UnitId::new(Faction::Player, UnitKind::Pawn, 1);
        let u = Unit::new(id, GridPos::new(2, 1), 2, 1);
        assert!(u.can_move());
        assert!(u.can_attack());
    }

    #[test]
    fn rooted_units_cannot_move_but_can_attack() {
        let id = UnitId::new(Faction::Player, UnitKind::Knight, 1);
        let mut u = Unit::new(id, GridPos::new(2, 1), 2, 1);
        u.status.rooted_turns = 1;
        assert!(!u.can_move());
        assert!(u.can_attack());
    }

    #[test]
    fn attack_modifier_is_one_shot() {
        let mut status = UnitStatus {
            next_attack_modifier: 2,
            ..UnitStatus::default()
        };
        assert_eq!(status.take_attack_modifier(), 2);
        assert_eq!(status.take_attack_modifier(), 0);
    }
}
