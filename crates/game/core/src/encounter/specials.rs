//! Enemy special abilities.
//!
//! Each kind maps to at most one effect, dispatched from a table rather than
//! per-kind branches in the executor. A special gets one probability-gated
//! attempt per unit per enemy turn, before the unit's attack; effects that
//! modify the unit's next attack (venom, lifesteal) are parked in
//! `pending_attack_specials` and consumed by the attack itself.

use tracing::debug;

use crate::env::{EnemySpecial, SpecialEffect};
use crate::events::EncounterEvent;
use crate::rng::PcgRng;
use crate::state::{Faction, UnitId, UnitKind};

use super::EncounterController;

impl EncounterController {
    /// Rolls the actor's special, applies it on success, and reports whether
    /// anything happened.
    pub(crate) fn try_execute_special(&mut self, actor: UnitId) -> bool {
        let Some(special) = self.content.enemy_special(actor.kind) else {
            return false;
        };
        if special.chance_percent == 0 {
            return false;
        }
        let roll = (PcgRng::next_u32(self.special_roll_seed(actor)) % 100) + 1;
        if roll > special.chance_percent {
            return false;
        }

        let applied = match special.effect {
            SpecialEffect::Shriek => self.apply_shriek(actor, &special),
            SpecialEffect::PackHowl => self.apply_pack_howl(&special),
            SpecialEffect::WebTrap => self.apply_web_trap(actor, &special),
            SpecialEffect::SuperLeap => self.apply_super_leap(actor, &special),
            SpecialEffect::StenchMissile => self.apply_stench_missile(actor, &special),
            SpecialEffect::SleepVenom | SpecialEffect::Rend => {
                self.pending_attack_specials.insert(actor, special.effect);
                true
            }
            SpecialEffect::Enrage => self.apply_enrage(actor, &special),
            SpecialEffect::AlphaCall => self.apply_alpha_call(),
            SpecialEffect::Lunge => self.apply_lunge(actor, &special),
        };
        if !applied {
            return false;
        }
        debug!(actor = %actor, effect = %special.effect, "special triggered");
        self.events.push(EncounterEvent::SpecialTriggered {
            actor,
            description: special.effect.to_string(),
        });
        true
    }

    /// Next-attack debuff to every non-structure unit on the dominant-axis
    /// line through the nearest player.
    fn apply_shriek(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(actor_pos) = self.board.unit(actor).map(|u| u.pos) else {
            return false;
        };
        let Some(nearest) = self.board.nearest_player(actor_pos) else {
            return false;
        };
        let use_row =
            (nearest.pos.row - actor_pos.row).abs() >= (nearest.pos.col - actor_pos.col).abs();
        let line = if use_row { nearest.pos.row } else { nearest.pos.col };

        let victims: Vec<UnitId> = self
            .board
            .units()
            .filter(|u| !u.is_structure)
            .filter(|u| if use_row { u.pos.row == line } else { u.pos.col == line })
            .map(|u| u.id)
            .collect();
        let debuff = special.amount.max(1);
        for id in &victims {
            if let Some(u) = self.board.unit_mut(*id) {
                u.status.next_attack_modifier -= debuff;
            }
        }
        !victims.is_empty()
    }

    /// Every Coyote howls along: +amount next attack, needs a pack of two.
    fn apply_pack_howl(&mut self, special: &EnemySpecial) -> bool {
        let coyotes: Vec<UnitId> = self
            .board
            .faction_units(Faction::Enemy)
            .filter(|u| u.kind == UnitKind::Coyote)
            .map(|u| u.id)
            .collect();
        if coyotes.len() < 2 {
            return false;
        }
        let buff = special.amount.max(1);
        for id in coyotes {
            if let Some(u) = self.board.unit_mut(id) {
                u.status.next_attack_modifier += buff;
            }
        }
        true
    }

    fn apply_web_trap(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(actor_pos) = self.board.unit(actor).map(|u| u.pos) else {
            return false;
        };
        let Some(nearest) = self.board.nearest_player(actor_pos).map(|u| u.id) else {
            return false;
        };
        self.board.apply_damage(nearest, special.amount.max(1));
        self.events.push(EncounterEvent::DamageDealt {
            unit: nearest,
            amount: special.amount.max(1),
        });
        if let Some(u) = self.board.unit_mut(nearest) {
            u.status.rooted_turns = u.status.rooted_turns.max(special.turns.max(1));
        }
        true
    }

    /// Splash damage to every player unit in the 8 surrounding cells.
    fn apply_super_leap(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(actor_pos) = self.board.unit(actor).map(|u| u.pos) else {
            return false;
        };
        let victims: Vec<UnitId> = crate::rules::NEIGHBORS_8
            .iter()
            .map(|&(dr, dc)| actor_pos.offset(dr, dc))
            .filter_map(|p| self.board.at(p))
            .filter(|u| u.faction == Faction::Player)
            .map(|u| u.id)
            .collect();
        let damage = special.amount.max(1);
        for id in &victims {
            self.board.apply_damage(*id, damage);
            self.events.push(EncounterEvent::DamageDealt {
                unit: *id,
                amount: damage,
            });
        }
        !victims.is_empty()
    }

    /// Poisons a 2x2 landing zone three cells toward the nearest player.
    fn apply_stench_missile(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(actor_pos) = self.board.unit(actor).map(|u| u.pos) else {
            return false;
        };
        let Some(nearest_pos) = self.board.nearest_player(actor_pos).map(|u| u.pos) else {
            return false;
        };
        let (dr, dc) = actor_pos.direction_toward(nearest_pos);
        let center = actor_pos.offset(dr * 3, dc * 3);

        let mut applied = false;
        for r in 0..2 {
            for c in 0..2 {
                let p = center.offset(r, c);
                let victim = self
                    .board
                    .at(p)
                    .filter(|u| u.faction == Faction::Player)
                    .map(|u| u.id);
                if let Some(id) = victim {
                    if let Some(u) = self.board.unit_mut(id) {
                        u.status.poisoned_turns = u.status.poisoned_turns.max(special.turns.max(1));
                        applied = true;
                    }
                }
            }
        }
        applied
    }

    fn apply_enrage(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(u) = self.board.unit_mut(actor) else {
            return false;
        };
        u.attack += special.amount.max(1);
        true
    }

    /// Rallies every Coyote one greedy step toward its nearest player unit.
    fn apply_alpha_call(&mut self) -> bool {
        let coyotes: Vec<UnitId> = self
            .board
            .faction_units(Faction::Enemy)
            .filter(|u| u.kind == UnitKind::Coyote)
            .map(|u| u.id)
            .collect();
        let mut moved_any = false;
        for id in coyotes {
            let Some(pos) = self.board.unit(id).map(|u| u.pos) else {
                continue;
            };
            let Some(nearest_pos) = self.board.nearest_player(pos).map(|u| u.pos) else {
                continue;
            };
            let to = pos.step_toward(nearest_pos);
            if to == pos || !self.board.inside(to) || self.board.occupied(to) {
                continue;
            }
            if self.board.move_unit(id, to) {
                self.events.push(EncounterEvent::UnitMoved { unit: id, from: pos, to });
                moved_any = true;
            }
        }
        moved_any
    }

    /// Pounce windup: only lands at exactly two cells from the nearest player.
    fn apply_lunge(&mut self, actor: UnitId, special: &EnemySpecial) -> bool {
        let Some(actor_pos) = self.board.unit(actor).map(|u| u.pos) else {
            return false;
        };
        let Some(nearest_pos) = self.board.nearest_player(actor_pos).map(|u| u.pos) else {
            return false;
        };
        if actor_pos.manhattan(nearest_pos) != 2 {
            return false;
        }
        if let Some(u) = self.board.unit_mut(actor) {
            u.status.next_attack_modifier += special.amount.max(1);
        }
        true
    }
}
