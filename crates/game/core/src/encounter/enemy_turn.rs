//! Synchronous two-pass enemy turn execution.
//!
//! Pass 1 resolves every intent's special ability and attack from the
//! actor's current cell; pass 2 performs all repositioning. Attacks before
//! movement keeps the telegraphed attack squares truthful: what the player
//! saw at end of turn is exactly what gets hit.

use tracing::debug;

use crate::env::SpecialEffect;
use crate::events::EncounterEvent;
use crate::planner::IntentPlanner;
use crate::rng::SessionRng;
use crate::rules::ORTHOGONAL;
use crate::state::{Faction, GridPos, UnitId, UnitKind};

use super::EncounterController;

impl EncounterController {
    pub(crate) fn execute_enemy_turn(&mut self) {
        self.tick_caves();

        let planner = IntentPlanner::new(&self.board, self.content.as_ref())
            .with_weights(self.weights);
        let mut plan = planner.validate_or_recompute(self.plan.take());

        // Pass 1: specials, then attacks, all from current positions.
        for intent in &plan.intents {
            if self.board.unit(intent.actor).is_none() {
                continue;
            }
            self.try_execute_special(intent.actor);
            if !intent.attack_squares.is_empty() {
                self.execute_enemy_attack(intent.actor, &intent.attack_squares);
            }
        }

        // Pass 2: reposition. A destination taken since planning bounces the
        // unit back with no retry. Non-repositioning intents are skipped even
        // when a pass-1 special (AlphaCall) already displaced the actor.
        for intent in &mut plan.intents {
            let Some(actor) = self.board.unit(intent.actor) else {
                continue;
            };
            if !intent.repositions() || intent.to == actor.pos {
                continue;
            }
            let from = actor.pos;
            if self.board.move_unit(intent.actor, intent.to) {
                self.try_promote(intent.actor);
                self.events.push(EncounterEvent::UnitMoved {
                    unit: intent.actor,
                    from,
                    to: intent.to,
                });
            } else {
                debug!(actor = %intent.actor, to = %intent.to, "move bounced");
                intent.blocked = true;
                intent.to = from;
            }
        }
        self.plan = Some(plan);

        self.tick_statuses(Faction::Enemy);
        self.trigger_traps();
        self.check_win_lose();
    }

    /// Resolves one intent's attack. Damage goes only to player-faction
    /// units, except the Owl's piercing ray which hits the first unit of any
    /// faction and stops there. Pending venom/lifesteal effects from pass-1
    /// specials resolve with the attack.
    pub(crate) fn execute_enemy_attack(&mut self, actor: UnitId, squares: &[GridPos]) {
        let pending = self.pending_attack_specials.remove(&actor);
        self.events.push(EncounterEvent::AttackStarted {
            attacker: actor,
            squares: squares.to_vec(),
        });

        let mut total_damage = 0;
        for &sq in squares {
            let Some(target) = self.board.at(sq) else {
                continue;
            };
            let piercing = actor.kind == UnitKind::Owl;
            if !piercing && target.faction != Faction::Player {
                continue;
            }
            let target_id = target.id;
            let damage = self.outgoing_damage(actor);
            self.board.apply_damage(target_id, damage);
            self.events.push(EncounterEvent::DamageDealt {
                unit: target_id,
                amount: damage,
            });
            total_damage += damage;
            if pending == Some(SpecialEffect::SleepVenom) {
                if let Some(victim) = self.board.unit_mut(target_id) {
                    victim.status.sleeping_turns = victim.status.sleeping_turns.max(1);
                }
            }
            if piercing {
                break;
            }
        }

        if pending == Some(SpecialEffect::Rend) && total_damage > 0 {
            self.board.heal(actor, total_damage);
        }
        self.events.push(EncounterEvent::AttackResolved { attacker: actor });
    }

    /// Counts down every cave; at zero, spawns a weighted pick into the first
    /// free orthogonal neighbor. A cave at its alive cap retries next turn
    /// without spending a charge.
    pub(crate) fn tick_caves(&mut self) {
        for index in 0..self.caves.len() {
            let cave = self.caves[index].clone();
            if cave.exhausted() {
                continue;
            }
            let remaining = cave.turns_until_next_spawn.saturating_sub(1);
            self.caves[index].turns_until_next_spawn = remaining;
            if remaining > 0 {
                continue;
            }
            if self.alive_from_cave(cave.id) >= cave.max_alive {
                self.caves[index].turns_until_next_spawn = 1;
                continue;
            }
            let Some(spawn_pos) = self.adjacent_empty(cave.pos) else {
                continue;
            };

            let kind = self.pick_spawn(&cave);
            if let Some(id) = self.spawn_unit(kind, Faction::Enemy, spawn_pos) {
                if let Some(unit) = self.board.unit_mut(id) {
                    unit.spawned_by = Some(cave.id);
                }
                self.events.push(EncounterEvent::UnitSpawned {
                    unit: id,
                    at: spawn_pos,
                });
                debug!(cave = %cave.id, unit = %id, at = %spawn_pos, "cave spawned");
                self.caves[index].spawn_charges -= 1;
                self.caves[index].turns_until_next_spawn = cave.spawn_interval.max(1);
            }
        }
    }

    fn pick_spawn(&self, cave: &crate::state::CaveState) -> UnitKind {
        if cave.pool.is_empty() {
            return UnitKind::Bat;
        }
        let weights: Vec<u32> = cave.pool.iter().map(|w| w.weight.max(1)).collect();
        let total: u32 = weights.iter().sum();
        let mut rng = SessionRng::new(self.cave_pick_seed(total));
        let index = rng.weighted_pick(&weights).unwrap_or(0);
        cave.pool[index].kind
    }

    fn alive_from_cave(&self, cave: crate::state::CaveId) -> u32 {
        self.board
            .faction_units(Faction::Enemy)
            .filter(|u| u.spawned_by == Some(cave))
            .count() as u32
    }

    fn adjacent_empty(&self, pos: GridPos) -> Option<GridPos> {
        ORTHOGONAL
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .find(|&p| self.board.inside(p) && !self.board.occupied(p))
    }

    /// One-shot traps fire on any enemy standing on them at end of the enemy
    /// turn.
    pub(crate) fn trigger_traps(&mut self) {
        let mut index = 0;
        while index < self.traps.len() {
            let trap = self.traps[index];
            let victim = self
                .board
                .at(trap.pos)
                .filter(|u| u.faction == Faction::Enemy)
                .map(|u| u.id);
            let Some(victim) = victim else {
                index += 1;
                continue;
            };
            self.board.apply_damage(victim, trap.damage.max(1));
            if let Some(unit) = self.board.unit_mut(victim) {
                unit.status.sleeping_turns = unit.status.sleeping_turns.max(trap.sleep_turns);
            }
            self.events.push(EncounterEvent::TrapTriggered {
                at: trap.pos,
                victim,
            });
            self.traps.remove(index);
        }
    }
}
