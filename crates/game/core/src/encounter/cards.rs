//! Card targeting and resolution.
//!
//! A pending card computes its target-zone highlights up front; clicking a
//! highlighted cell spends energy first (failure aborts with a message and no
//! partial effect), then moves the card to discard and applies its effect
//! through the [`CardPlaySink`] seam.

use crate::cards::{CardDefinition, CardKind, CardPlaySink};
use crate::events::EncounterEvent;
use crate::state::{Faction, GridPos, TrapState, UnitId, UnitKind};

use super::EncounterController;

impl EncounterController {
    /// Valid target cells for a card:
    /// summons and barricades go on empty cells in the bottom two rows,
    /// traps in the middle band, heal and shield on friendly units.
    pub(crate) fn build_card_target_highlights(&mut self, card: &CardDefinition) {
        self.card_target_highlights.clear();
        let size = self.board.size();
        match card.kind {
            CardKind::Summon | CardKind::Barricade => {
                for row in ((size - 2).max(0)..size).rev() {
                    for col in 0..size {
                        let p = GridPos::new(row, col);
                        if !self.board.occupied(p) {
                            self.card_target_highlights.insert(p);
                        }
                    }
                }
            }
            CardKind::BearTrap | CardKind::SpikePit => {
                let low = (size / 2 - 1).max(1);
                let high = (size / 2 + 1).min(size - 2);
                for row in low..=high {
                    for col in 0..size {
                        let p = GridPos::new(row, col);
                        if !self.board.occupied(p) {
                            self.card_target_highlights.insert(p);
                        }
                    }
                }
            }
            CardKind::Heal | CardKind::Shield => {
                let friendly: Vec<GridPos> = self
                    .board
                    .faction_units(Faction::Player)
                    .map(|u| u.pos)
                    .collect();
                self.card_target_highlights.extend(friendly);
            }
        }
    }

    pub(crate) fn try_resolve_pending_card_at(&mut self, pos: GridPos) {
        let Some(card) = self.pending_card.clone() else {
            return;
        };
        if !self.card_target_highlights.contains(&pos) {
            self.message("Invalid tile for this card.");
            return;
        }

        let needs_empty = matches!(
            card.kind,
            CardKind::Summon | CardKind::Barricade | CardKind::BearTrap | CardKind::SpikePit
        );
        let target_unit = self
            .board
            .at(pos)
            .filter(|u| u.faction == Faction::Player)
            .map(|u| u.id);

        if needs_empty && self.board.occupied(pos) {
            self.message("Tile is occupied.");
            return;
        }
        if matches!(card.kind, CardKind::Heal | CardKind::Shield) && target_unit.is_none() {
            self.message("Select one of your units.");
            return;
        }

        if !self.turn.try_spend(card.cost) {
            self.message("Not enough energy.");
            return;
        }

        self.pending_card = None;
        self.card_target_highlights.clear();
        let Some(index) = self.deck.hand().iter().position(|c| c.id == card.id) else {
            return;
        };
        self.deck.play_from_hand(index);
        self.events.push(EncounterEvent::HandChanged);
        self.apply_card(&card, pos, target_unit);
        self.events.push(EncounterEvent::CardEffectApplied {
            card_id: card.id.clone(),
            at: Some(pos),
        });
    }

    fn apply_card(&mut self, card: &CardDefinition, pos: GridPos, target_unit: Option<UnitId>) {
        match card.kind {
            CardKind::Heal => {
                if let Some(target) = target_unit {
                    self.heal_unit(target, card.amount.max(1));
                }
            }
            CardKind::Shield => {
                if let Some(target) = target_unit {
                    self.shield_unit(target, card.amount.max(1));
                }
            }
            CardKind::Summon => {
                if let Some(kind) = card.summon_kind {
                    self.summon_unit(kind, pos);
                }
            }
            CardKind::Barricade => self.place_barricade(pos),
            CardKind::BearTrap => self.place_trap(pos, card.amount.max(1), 1),
            CardKind::SpikePit => self.place_trap(pos, card.amount.max(1), 0),
        }
    }
}

impl CardPlaySink for EncounterController {
    fn heal_unit(&mut self, target: UnitId, amount: i32) {
        self.board.heal(target, amount);
        // Persistent king hp follows the board copy.
        if let Some(unit) = self.board.unit(target) {
            if unit.kind == UnitKind::King {
                self.session.king_hp = unit.hp;
            }
        }
    }

    /// Shield charges are set-to-at-least, never additive.
    fn shield_unit(&mut self, target: UnitId, charges: i32) {
        if let Some(unit) = self.board.unit_mut(target) {
            let charges = charges.max(1).min(i32::from(u8::MAX)) as u8;
            unit.status.shield_charge = unit.status.shield_charge.max(charges);
        }
    }

    fn summon_unit(&mut self, kind: UnitKind, at: GridPos) {
        if self.spawn_unit(kind, Faction::Player, at).is_some() {
            self.events.push(EncounterEvent::UnitSummoned { kind, at });
        }
    }

    /// Barricades are neutral 12 hp / 0 attack rocks: enemies never target
    /// them, they just block paths until the player clears them.
    fn place_barricade(&mut self, at: GridPos) {
        if let Some(id) = self.spawn_unit(UnitKind::Rock, Faction::Neutral, at) {
            if let Some(rock) = self.board.unit_mut(id) {
                rock.max_hp = 12;
                rock.hp = 12;
                rock.attack = 0;
            }
            self.events.push(EncounterEvent::UnitSummoned {
                kind: UnitKind::Rock,
                at,
            });
        }
    }

    fn place_trap(&mut self, at: GridPos, damage: i32, sleep_turns: u8) {
        self.traps.push(TrapState {
            pos: at,
            damage,
            sleep_turns,
        });
    }
}
