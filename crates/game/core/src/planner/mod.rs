//! Enemy intent planning.
//!
//! Each enemy phase produces an [`EnemyPlan`]: one telegraphed intent per
//! living, non-sleeping enemy, built in ascending unit-id order so planning is
//! deterministic and replayable. Commitment penalties steer later enemies away
//! from targets and destination cells earlier intents claimed; the reserved
//! set is the backstop — an enemy whose best destination is already claimed
//! holds position rather than double-booking the cell, so no two intents in
//! one plan ever share a non-origin destination.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::env::ContentOracle;
use crate::rules;
use crate::state::{BoardState, Faction, GridPos, Unit, UnitId, UnitKind};

/// What an intent does when executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentKind {
    Move,
    Capture,
    /// Spider capture; executed like [`IntentKind::Capture`], telegraphed
    /// differently.
    Web,
    /// Cave spawn telegraph; emitted by the encounter layer, never the planner.
    Spawn,
    Wait,
}

/// A planned enemy action, computed ahead of execution and telegraphed to the
/// player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyIntent {
    pub actor: UnitId,
    /// Kind is carried because attack shapes are kind-specific.
    pub actor_kind: UnitKind,
    pub target: Option<UnitId>,
    pub kind: IntentKind,
    pub from: GridPos,
    pub to: GridPos,
    /// Cells hit this turn. Empty for pure moves.
    pub attack_squares: Vec<GridPos>,
    pub blocked: bool,
    /// Diagnostic tag for logs and tests.
    #[cfg_attr(feature = "serde", serde(skip_deserializing))]
    pub reason: &'static str,
}

impl EnemyIntent {
    fn wait(actor: &Unit, reason: &'static str) -> Self {
        Self {
            actor: actor.id,
            actor_kind: actor.kind,
            target: None,
            kind: IntentKind::Wait,
            from: actor.pos,
            to: actor.pos,
            attack_squares: Vec::new(),
            blocked: false,
            reason,
        }
    }

    pub fn repositions(&self) -> bool {
        self.to != self.from
    }
}

/// Ordered intents plus the destinations they claimed while planning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyPlan {
    pub intents: Vec<EnemyIntent>,
    pub reserved: BTreeSet<GridPos>,
}

/// Named scoring weights. Tuning constants, not load-bearing invariants;
/// adjust freely as long as the king bonus dwarfs everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerWeights {
    /// Base value of any reachable attack.
    pub attack_base: i64,
    /// Added when the target is the player King.
    pub king_target_bonus: i64,
    /// Added when the attack would kill the target outright.
    pub lethal_bonus: i64,
    /// Subtracted per cell of Manhattan distance to the target.
    pub distance_penalty: i64,
    /// Subtracted per earlier intent already committed to the same target.
    pub target_commitment_penalty: i64,
    /// Subtracted per earlier intent already committed to the same cell.
    pub square_commitment_penalty: i64,
    /// Added per threatened cell a player unit could move into next turn.
    pub pressure_bonus: i64,
}

impl Default for PlannerWeights {
    fn default() -> Self {
        Self {
            attack_base: 100,
            king_target_bonus: 10_000,
            lethal_bonus: 500,
            distance_penalty: 10,
            target_commitment_penalty: 120,
            square_commitment_penalty: 150,
            pressure_bonus: 15,
        }
    }
}

/// Stateless plan builder; borrows the board and content for one pass.
pub struct IntentPlanner<'a> {
    board: &'a BoardState,
    content: &'a dyn ContentOracle,
    weights: PlannerWeights,
}

struct Commitments {
    targets: BTreeMap<UnitId, i64>,
    squares: BTreeMap<GridPos, i64>,
}

struct Candidate {
    target: UnitId,
    score: i64,
}

impl<'a> IntentPlanner<'a> {
    pub fn new(board: &'a BoardState, content: &'a dyn ContentOracle) -> Self {
        Self {
            board,
            content,
            weights: PlannerWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: PlannerWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builds a fresh plan for every living, non-sleeping enemy.
    pub fn build_plan(&self) -> EnemyPlan {
        let pressure = self.pressure_squares();
        let mut plan = EnemyPlan::default();
        let mut commitments = Commitments {
            targets: BTreeMap::new(),
            squares: BTreeMap::new(),
        };

        let actors: Vec<&Unit> = self
            .board
            .faction_units(Faction::Enemy)
            .filter(|u| !u.is_structure && !u.status.is_sleeping())
            .collect();

        for actor in actors {
            let intent = self.build_intent(actor, &plan.reserved, &commitments, &pressure);
            if let Some(target) = intent.target {
                *commitments.targets.entry(target).or_default() += 1;
            }
            if intent.repositions() {
                plan.reserved.insert(intent.to);
                *commitments.squares.entry(intent.to).or_default() += 1;
            }
            debug!(
                actor = %intent.actor,
                kind = %intent.kind,
                from = %intent.from,
                to = %intent.to,
                reason = intent.reason,
                "planned intent"
            );
            plan.intents.push(intent);
        }
        plan
    }

    /// Cheap drift repair: keeps intents whose actor is still alive and
    /// re-derives the reserved set from the survivors. Never re-scores.
    pub fn validate_or_recompute(&self, plan: Option<EnemyPlan>) -> EnemyPlan {
        let Some(mut plan) = plan else {
            return self.build_plan();
        };
        plan.intents
            .retain(|it| self.board.unit(it.actor).is_some());
        plan.reserved = plan
            .intents
            .iter()
            .filter(|it| it.repositions())
            .map(|it| it.to)
            .collect();
        plan
    }

    /// Union of every player unit's move tiles: cells likely contested next
    /// player turn. A minor positioning bonus, never a hard constraint.
    fn pressure_squares(&self) -> BTreeSet<GridPos> {
        let mut pressure = BTreeSet::new();
        for unit in self.board.faction_units(Faction::Player) {
            pressure.extend(rules::move_tiles(self.board, unit));
        }
        pressure
    }

    fn build_intent(
        &self,
        actor: &Unit,
        reserved: &BTreeSet<GridPos>,
        commitments: &Commitments,
        pressure: &BTreeSet<GridPos>,
    ) -> EnemyIntent {
        let players: Vec<&Unit> = self.board.faction_units(Faction::Player).collect();
        if players.is_empty() {
            return EnemyIntent::wait(actor, "no_target");
        }
        let behavior = self.content.enemy_behavior(actor.kind);

        // Best target hittable from where the actor already stands.
        let mut immediate: Option<Candidate> = None;
        for target in &players {
            let squares =
                rules::enemy_attack_squares(self.board, actor, &behavior, actor.pos, target.pos);
            if !squares.contains(&target.pos) {
                continue;
            }
            let score = self.score(
                actor,
                target,
                actor.pos,
                true,
                &squares,
                pressure,
                commitments,
            );
            trace!(actor = %actor.id, target = %target.id, score, "attack candidate");
            // Strict comparison keeps the first-enumerated candidate on ties.
            if immediate.as_ref().is_none_or(|b| score > b.score) {
                immediate = Some(Candidate {
                    target: target.id,
                    score,
                });
            }
        }

        // Best reposition destination, evaluated independently of the attack.
        // Claimed cells stay in the race but carry the square-commitment
        // penalty, so a marginally worse free cell normally wins.
        let mut reposition: Option<(GridPos, UnitId, i64)> = None;
        for target in &players {
            for dest in rules::enemy_move_candidates(self.board, actor, &behavior, target.pos) {
                let squares =
                    rules::enemy_attack_squares(self.board, actor, &behavior, dest, target.pos);
                let hits = squares.contains(&target.pos);
                let score = self.score(actor, target, dest, hits, &squares, pressure, commitments);
                trace!(actor = %actor.id, target = %target.id, dest = %dest, score, "move candidate");
                if reposition.as_ref().is_none_or(|&(_, _, b)| score > b) {
                    reposition = Some((dest, target.id, score));
                }
            }
        }
        // Backstop: if the penalty was not enough to divert the actor off a
        // claimed cell, it holds position instead of double-booking it.
        let reposition = reposition.filter(|&(dest, _, _)| !reserved.contains(&dest));

        let capture_kind = if actor.kind == UnitKind::Spider {
            IntentKind::Web
        } else {
            IntentKind::Capture
        };

        match (immediate, reposition) {
            (Some(attack), reposition) => {
                let target_pos = self
                    .board
                    .unit(attack.target)
                    .map(|t| t.pos)
                    .unwrap_or(actor.pos);
                let squares = rules::enemy_attack_squares(
                    self.board, actor, &behavior, actor.pos, target_pos,
                );
                // Attack resolves from the current cell; the destination is
                // the post-attack reposition, whatever scored best on its own.
                EnemyIntent {
                    actor: actor.id,
                    actor_kind: actor.kind,
                    target: Some(attack.target),
                    kind: capture_kind,
                    from: actor.pos,
                    to: reposition.map_or(actor.pos, |(dest, _, _)| dest),
                    attack_squares: squares,
                    blocked: false,
                    reason: "in_range",
                }
            }
            (None, Some((dest, target, _))) => EnemyIntent {
                actor: actor.id,
                actor_kind: actor.kind,
                target: Some(target),
                kind: IntentKind::Move,
                from: actor.pos,
                to: dest,
                attack_squares: Vec::new(),
                blocked: false,
                reason: "advance",
            },
            // Nothing to hit and nowhere to go; `blocked` stays false because
            // it means "bounced during execution", not "never had a path".
            (None, None) => EnemyIntent::wait(actor, "no_path"),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn score(
        &self,
        actor: &Unit,
        target: &Unit,
        dest: GridPos,
        hits_target: bool,
        attack_squares: &[GridPos],
        pressure: &BTreeSet<GridPos>,
        commitments: &Commitments,
    ) -> i64 {
        let w = &self.weights;
        let mut score = 0i64;
        if hits_target {
            score += w.attack_base;
            if target.kind == UnitKind::King {
                score += w.king_target_bonus;
            }
            if actor.attack >= target.hp {
                score += w.lethal_bonus;
            }
        }
        score -= w.distance_penalty * i64::from(dest.manhattan(target.pos));
        score -= w.target_commitment_penalty
            * commitments.targets.get(&target.id).copied().unwrap_or(0);
        score -=
            w.square_commitment_penalty * commitments.squares.get(&dest).copied().unwrap_or(0);
        score += w.pressure_bonus
            * attack_squares
                .iter()
                .filter(|sq| pressure.contains(sq))
                .count() as i64;
        score
    }
}
