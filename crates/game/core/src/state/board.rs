use std::collections::BTreeMap;

use super::common::{Faction, GridPos};
use super::unit::{Unit, UnitId, UnitKind};

/// Square grid holding at most one unit per cell.
///
/// Owns the unit registry and the occupancy index. All position and hp
/// mutation funnels through [`BoardState::add`], [`BoardState::move_unit`],
/// [`BoardState::remove`], [`BoardState::apply_damage`] and
/// [`BoardState::heal`], which keep the occupancy invariant:
/// `occupancy[unit.pos] == unit.id` for every live unit.
///
/// Both maps are `BTreeMap` so iteration order is deterministic; the intent
/// planner relies on ascending unit-id order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    size: i32,
    units: BTreeMap<UnitId, Unit>,
    occupancy: BTreeMap<GridPos, UnitId>,
}

impl BoardState {
    pub fn new(size: i32) -> Self {
        Self {
            size: size.max(1),
            units: BTreeMap::new(),
            occupancy: BTreeMap::new(),
        }
    }

    /// Clears all state and sets the side length.
    pub fn reset(&mut self, size: i32) {
        self.size = size.max(1);
        self.units.clear();
        self.occupancy.clear();
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn inside(&self, p: GridPos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.size && p.col < self.size
    }

    pub fn occupied(&self, p: GridPos) -> bool {
        self.occupancy.contains_key(&p)
    }

    pub fn at(&self, p: GridPos) -> Option<&Unit> {
        self.occupancy.get(&p).and_then(|id| self.units.get(id))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Mutable access for status edits. Position and hp changes must go
    /// through the dedicated board operations instead.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Iterates all live units in ascending unit-id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn faction_units(&self, faction: Faction) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.faction == faction)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn find_king(&self) -> Option<&Unit> {
        self.units
            .values()
            .find(|u| u.faction == Faction::Player && u.kind == UnitKind::King)
    }

    /// Nearest player unit by Manhattan distance; ties resolve to the lowest
    /// unit id thanks to the deterministic iteration order.
    pub fn nearest_player(&self, from: GridPos) -> Option<&Unit> {
        let mut best: Option<(&Unit, i32)> = None;
        for u in self.faction_units(Faction::Player) {
            let d = from.manhattan(u.pos);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((u, d));
            }
        }
        best.map(|(u, _)| u)
    }

    /// Registers a unit. Fails without side effects when the position is out
    /// of bounds, the cell is occupied, or the id is already registered.
    pub fn add(&mut self, unit: Unit) -> bool {
        if !self.inside(unit.pos) || self.occupied(unit.pos) || self.units.contains_key(&unit.id) {
            return false;
        }
        self.occupancy.insert(unit.pos, unit.id);
        self.units.insert(unit.id, unit);
        true
    }

    /// Moves a unit, atomically updating the occupancy index. Fails without
    /// side effects when the destination is invalid or occupied.
    pub fn move_unit(&mut self, id: UnitId, to: GridPos) -> bool {
        if !self.inside(to) || self.occupied(to) {
            return false;
        }
        let Some(unit) = self.units.get_mut(&id) else {
            return false;
        };
        self.occupancy.remove(&unit.pos);
        unit.pos = to;
        self.occupancy.insert(to, id);
        true
    }

    pub fn remove(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.units.remove(&id) else {
            return false;
        };
        self.occupancy.remove(&unit.pos);
        true
    }

    /// Sole damage-application path for combat, traps, poison and specials.
    ///
    /// Negative or zero damage is clamped to zero. A shield charge, if
    /// present, is always consumed and reduces the incoming damage by one
    /// (floor zero). A unit whose hp drops to zero or below is removed
    /// atomically. Returns false only for unknown ids.
    pub fn apply_damage(&mut self, id: UnitId, damage: i32) -> bool {
        let Some(unit) = self.units.get_mut(&id) else {
            return false;
        };
        let mut incoming = damage.max(0);
        if unit.status.shield_charge > 0 {
            incoming = (incoming - 1).max(0);
            unit.status.shield_charge = 0;
        }
        unit.hp -= incoming;
        if unit.hp <= 0 {
            self.remove(id);
        }
        true
    }

    /// Restores hp, clamped to the unit's maximum. Returns the amount healed.
    pub fn heal(&mut self, id: UnitId, amount: i32) -> i32 {
        let Some(unit) = self.units.get_mut(&id) else {
            return 0;
        };
        let before = unit.hp;
        unit.hp = (unit.hp + amount.max(0)).min(unit.max_hp);
        unit.hp - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(faction: Faction, kind: UnitKind, serial: u32, pos: GridPos, hp: i32) -> Unit {
        Unit::new(UnitId::new(faction, kind, serial), pos, hp, 1)
    }

    fn occupancy_consistent(board: &BoardState) -> bool {
        board.units().all(|u| {
            board
                .at(u.pos)
                .map_or(false, |at| at.id == u.id)
        })
    }

    #[test]
    fn add_rejects_out_of_bounds_and_duplicates() {
        let mut board = BoardState::new(4);
        assert!(!board.add(unit(Faction::Player, UnitKind::Pawn, 1, GridPos::new(4, 0), 1)));
        assert!(board.add(unit(Faction::Player, UnitKind::Pawn, 1, GridPos::new(2, 0), 1)));
        // Same cell.
        assert!(!board.add(unit(Faction::Player, UnitKind::Pawn, 2, GridPos::new(2, 0), 1)));
        // Same id.
        assert!(!board.add(unit(Faction::Player, UnitKind::Pawn, 1, GridPos::new(3, 0), 1)));
        assert_eq!(board.unit_count(), 1);
        assert!(occupancy_consistent(&board));
    }

    #[test]
    fn move_fails_on_occupied_destination_without_mutation() {
        let mut board = BoardState::new(4);
        let a = unit(Faction::Player, UnitKind::Pawn, 1, GridPos::new(2, 0), 1);
        let b = unit(Faction::Enemy, UnitKind::Bat, 2, GridPos::new(1, 0), 1);
        let a_id = a.id;
        board.add(a);
        board.add(b);
        assert!(!board.move_unit(a_id, GridPos::new(1, 0)));
        assert_eq!(board.unit(a_id).unwrap().pos, GridPos::new(2, 0));
        assert!(occupancy_consistent(&board));
    }

    #[test]
    fn move_updates_occupancy_atomically() {
        let mut board = BoardState::new(4);
        let a = unit(Faction::Player, UnitKind::Knight, 1, GridPos::new(3, 1), 2);
        let a_id = a.id;
        board.add(a);
        assert!(board.move_unit(a_id, GridPos::new(1, 2)));
        assert!(!board.occupied(GridPos::new(3, 1)));
        assert_eq!(board.at(GridPos::new(1, 2)).unwrap().id, a_id);
        assert!(occupancy_consistent(&board));
    }

    #[test]
    fn shield_consumes_even_when_it_fully_blocks() {
        let mut board = BoardState::new(4);
        let mut a = unit(Faction::Player, UnitKind::King, 1, GridPos::new(3, 2), 5);
        a.status.shield_charge = 1;
        let id = a.id;
        board.add(a);
        assert!(board.apply_damage(id, 1));
        let king = board.unit(id).unwrap();
        assert_eq!(king.hp, 5);
        assert_eq!(king.status.shield_charge, 0);
    }

    #[test]
    fn shield_reduces_damage_by_exactly_one() {
        let mut board = BoardState::new(4);
        let mut a = unit(Faction::Player, UnitKind::King, 1, GridPos::new(3, 2), 5);
        a.status.shield_charge = 1;
        let id = a.id;
        board.add(a);
        board.apply_damage(id, 2);
        let king = board.unit(id).unwrap();
        assert_eq!(king.hp, 4);
        assert_eq!(king.status.shield_charge, 0);
    }

    #[test]
    fn zero_and_negative_damage_are_no_ops_on_hp() {
        let mut board = BoardState::new(4);
        let a = unit(Faction::Enemy, UnitKind::Bat, 1, GridPos::new(0, 0), 2);
        let id = a.id;
        board.add(a);
        assert!(board.apply_damage(id, 0));
        assert!(board.apply_damage(id, -3));
        assert_eq!(board.unit(id).unwrap().hp, 2);
    }

    #[test]
    fn lethal_damage_removes_unit_from_both_indices() {
        let mut board = BoardState::new(4);
        let a = unit(Faction::Enemy, UnitKind::Bat, 1, GridPos::new(0, 2), 1);
        let id = a.id;
        let pos = a.pos;
        board.add(a);
        assert!(board.apply_damage(id, 3));
        assert!(board.unit(id).is_none());
        assert!(!board.occupied(pos));
    }

    #[test]
    fn apply_damage_unknown_id_returns_false() {
        let mut board = BoardState::new(4);
        assert!(!board.apply_damage(UnitId::new(Faction::Enemy, UnitKind::Bat, 9), 1));
    }

    #[test]
    fn heal_clamps_to_max_hp() {
        let mut board = BoardState::new(4);
        let a = unit(Faction::Player, UnitKind::King, 1, GridPos::new(3, 2), 5);
        let id = a.id;
        board.add(a);
        board.apply_damage(id, 2);
        assert_eq!(board.heal(id, 10), 2);
        assert_eq!(board.unit(id).unwrap().hp, 5);
    }

    #[test]
    fn nearest_player_breaks_ties_by_unit_id() {
        let mut board = BoardState::new(5);
        board.add(unit(Faction::Player, UnitKind::Pawn, 2, GridPos::new(2, 0), 1));
        board.add(unit(Faction::Player, UnitKind::Pawn, 1, GridPos::new(0, 2), 1));
        let nearest = board.nearest_player(GridPos::new(0, 0)).unwrap();
        assert_eq!(nearest.id.serial, 1);
    }
}
