//! Encounter orchestration.
//!
//! [`EncounterController`] owns the board, turn state, deck, traps, caves and
//! the current enemy plan for the lifetime of one encounter, and is the only
//! component that mutates the board. External callers drive it through four
//! commands (`start_node`, `select_at`, `try_play_card`, `end_player_turn`)
//! and observe it through the event queue plus read-only state queries.
//!
//! The enemy turn runs synchronously inside `end_player_turn`: once it
//! begins, no player command is accepted until the phase flips back.

mod cards;
mod enemy_turn;
mod specials;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use crate::cards::{CardDefinition, DeckState};
use crate::config::GameConfig;
use crate::env::{ContentOracle, EncounterTemplate, SpecialEffect};
use crate::events::{EncounterEvent, EventQueue};
use crate::planner::{EnemyPlan, IntentPlanner, PlannerWeights};
use crate::rng::{SessionRng, mix_seed};
use crate::rules;
use crate::state::{
    ActionFlags, BoardState, CaveState, Faction, GridPos, RunNode, SessionState, TrapState,
    TurnPhase, TurnState, Unit, UnitId, UnitKind,
};

/// Seed salts separating the independent random streams of one encounter.
const SALT_DECK: u32 = 0;
const SALT_SPECIAL: u32 = 1;
const SALT_CAVE: u32 = 2;

/// API misuse on the command surface. Gameplay rejections (bad target, not
/// enough energy) are not errors; they surface as
/// [`EncounterEvent::Message`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no active encounter")]
    NoActiveEncounter,
    #[error("encounter already resolved")]
    EncounterResolved,
    #[error("command requires the player phase")]
    NotPlayerPhase,
    #[error("no card at hand index {0}")]
    NoSuchCard(usize),
}

/// Owns and drives one encounter at a time across a run.
pub struct EncounterController {
    content: Arc<dyn ContentOracle>,
    session: SessionState,
    turn: TurnState,
    board: BoardState,
    deck: DeckState,
    deck_rng: SessionRng,
    plan: Option<EnemyPlan>,
    weights: PlannerWeights,
    traps: Vec<TrapState>,
    caves: Vec<CaveState>,
    selected: Option<UnitId>,
    pending_card: Option<CardDefinition>,
    move_highlights: BTreeSet<GridPos>,
    attack_highlights: BTreeSet<GridPos>,
    card_target_highlights: BTreeSet<GridPos>,
    pending_attack_specials: BTreeMap<UnitId, SpecialEffect>,
    events: EventQueue,
    active_node: Option<RunNode>,
    resolved: bool,
    next_serial: u32,
}

impl EncounterController {
    pub fn new(content: Arc<dyn ContentOracle>, session: SessionState) -> Self {
        let rules = content.rules();
        let deck_rng = SessionRng::new(mix_seed(
            session.seed,
            u64::from(session.encounter_index),
            0,
            SALT_DECK,
        ));
        Self {
            content,
            session,
            turn: TurnState::new(rules.energy_per_round, rules.max_energy),
            board: BoardState::new(GameConfig::DEFAULT_BOARD_SIZE),
            deck: DeckState::default(),
            deck_rng,
            plan: None,
            weights: PlannerWeights::default(),
            traps: Vec::new(),
            caves: Vec::new(),
            selected: None,
            pending_card: None,
            move_highlights: BTreeSet::new(),
            attack_highlights: BTreeSet::new(),
            card_target_highlights: BTreeSet::new(),
            pending_attack_specials: BTreeMap::new(),
            events: EventQueue::default(),
            active_node: None,
            resolved: false,
            next_serial: 0,
        }
    }

    pub fn with_weights(mut self, weights: PlannerWeights) -> Self {
        self.weights = weights;
        self
    }

    // ----- read model -----

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn plan(&self) -> Option<&EnemyPlan> {
        self.plan.as_ref()
    }

    pub fn hand(&self) -> &[CardDefinition] {
        self.deck.hand()
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn pending_card(&self) -> Option<&CardDefinition> {
        self.pending_card.as_ref()
    }

    pub fn traps(&self) -> &[TrapState] {
        &self.traps
    }

    pub fn caves(&self) -> &[CaveState] {
        &self.caves
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn move_highlights(&self) -> &BTreeSet<GridPos> {
        &self.move_highlights
    }

    pub fn attack_highlights(&self) -> &BTreeSet<GridPos> {
        &self.attack_highlights
    }

    pub fn card_target_highlights(&self) -> &BTreeSet<GridPos> {
        &self.card_target_highlights
    }

    /// Drains every event emitted since the last drain, in occurrence order.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        self.events.drain()
    }

    // ----- commands -----

    /// Enters a run node. Battle-like nodes build an encounter; everything
    /// else resolves on the spot.
    pub fn start_node(&mut self, node: RunNode) {
        self.resolved = false;
        if !node.node_type.is_battle() {
            self.message(format!("Resolved {} node.", node.node_type));
            self.resolved = true;
            self.session.mark_node_complete(&node.id);
            self.events.push(EncounterEvent::EncounterResolved {
                won: true,
                node_id: node.id.clone(),
            });
            self.active_node = Some(node);
            return;
        }
        self.active_node = Some(node);
        self.build_encounter();
    }

    /// Click/tap routing: resolves pending-card targeting, selection, a move
    /// or an attack depending on the current mode.
    pub fn select_at(&mut self, pos: GridPos) -> Result<(), CommandError> {
        self.require_player_phase()?;
        if !self.board.inside(pos) {
            return Ok(());
        }
        if self.pending_card.is_some() {
            self.try_resolve_pending_card_at(pos);
            return Ok(());
        }

        let hit = self.board.at(pos).map(|u| u.id);
        if self.try_handle_player_command(pos, hit) {
            return Ok(());
        }

        if self.selected.is_some() && self.selected == hit {
            self.clear_selection();
            return Ok(());
        }
        self.selected = hit;
        self.recompute_selection_highlights();
        Ok(())
    }

    /// Marks the card at `index` pending and highlights its target zone;
    /// re-selecting the pending card cancels it at no cost.
    pub fn try_play_card(&mut self, index: usize) -> Result<(), CommandError> {
        self.require_player_phase()?;
        let Some(card) = self.deck.hand().get(index).cloned() else {
            return Err(CommandError::NoSuchCard(index));
        };

        if self.pending_card.as_ref().is_some_and(|p| p.id == card.id) {
            self.pending_card = None;
            self.card_target_highlights.clear();
            self.message(format!("{} deselected.", card.name));
            return Ok(());
        }

        self.message(format!("Select a target for {}.", card.name));
        self.build_card_target_highlights(&card);
        self.pending_card = Some(card);
        Ok(())
    }

    /// Ends the player phase and runs the whole enemy turn synchronously.
    pub fn end_player_turn(&mut self) -> Result<(), CommandError> {
        self.require_player_phase()?;
        self.pending_card = None;
        self.card_target_highlights.clear();
        self.clear_selection();

        self.tick_statuses(Faction::Player);
        self.deck.discard_hand();
        self.events.push(EncounterEvent::HandChanged);
        self.turn.phase = TurnPhase::Enemy;
        self.events.push(EncounterEvent::PhaseChanged {
            phase: TurnPhase::Enemy,
            round: self.turn.round,
        });

        self.execute_enemy_turn();

        self.begin_player_phase();
        Ok(())
    }

    // ----- encounter setup -----

    fn build_encounter(&mut self) {
        let rules = self.content.rules();
        let node_id = self
            .active_node
            .as_ref()
            .map(|n| n.id.clone())
            .unwrap_or_default();
        let template = self
            .content
            .encounter(&node_id)
            .unwrap_or_else(|| EncounterTemplate {
                board_size: GameConfig::DEFAULT_BOARD_SIZE,
                ..EncounterTemplate::default()
            });
        debug!(node = %node_id, size = template.board_size, "building encounter");

        self.board.reset(template.board_size.max(2));
        self.traps.clear();
        self.caves.clear();
        self.plan = None;
        self.next_serial = 0;
        self.selected = None;
        self.pending_card = None;
        self.move_highlights.clear();
        self.attack_highlights.clear();
        self.card_target_highlights.clear();
        self.pending_attack_specials.clear();

        self.spawn_king(rules.king_max_hp);
        for placement in &template.player_extras {
            self.spawn_unit(placement.kind, placement.faction, placement.pos);
        }
        for placement in &template.enemies {
            self.spawn_unit(placement.kind, Faction::Enemy, placement.pos);
        }
        for (index, cave) in template.caves.iter().enumerate() {
            let id = crate::state::CaveId(index as u32 + 1);
            if self.spawn_unit(UnitKind::Cave, Faction::Neutral, cave.pos).is_some() {
                self.caves.push(CaveState {
                    id,
                    pos: cave.pos,
                    turns_until_next_spawn: cave.spawn_interval,
                    spawn_interval: cave.spawn_interval,
                    spawn_charges: cave.spawn_charges,
                    max_alive: cave.max_alive,
                    pool: cave.pool.clone(),
                });
            }
        }

        self.deck_rng = SessionRng::new(mix_seed(
            self.session.seed,
            u64::from(self.session.encounter_index),
            0,
            SALT_DECK,
        ));
        self.deck = DeckState::configure(
            self.content.starter_deck(),
            rules.hand_size,
            &mut self.deck_rng,
        );
        self.turn = TurnState::new(rules.energy_per_round, rules.max_energy);
        self.deck.draw_fresh_turn_hand(&mut self.deck_rng);
        self.events.push(EncounterEvent::HandChanged);
        self.rebuild_intents();
        self.events.push(EncounterEvent::PhaseChanged {
            phase: TurnPhase::Player,
            round: self.turn.round,
        });
    }

    fn spawn_king(&mut self, king_max_hp: i32) {
        let size = self.board.size();
        let pos = GridPos::new(size - 1, size / 2);
        if let Some(id) = self.spawn_unit(UnitKind::King, Faction::Player, pos) {
            if let Some(king) = self.board.unit_mut(id) {
                king.max_hp = king_max_hp;
                king.hp = self.session.king_spawn_hp().min(king_max_hp);
            }
        }
    }

    /// Creates a unit from the content profile and places it. Returns `None`
    /// when the cell is unavailable.
    pub(crate) fn spawn_unit(
        &mut self,
        kind: UnitKind,
        faction: Faction,
        pos: GridPos,
    ) -> Option<UnitId> {
        self.next_serial += 1;
        let profile = self.content.unit_profile(kind);
        let id = UnitId::new(faction, kind, self.next_serial);
        let unit = Unit::new(id, pos, profile.max_hp.max(1), profile.attack.max(0));
        if !self.board.add(unit) {
            return None;
        }
        Some(id)
    }

    // ----- player commands -----

    fn try_handle_player_command(&mut self, pos: GridPos, hit: Option<UnitId>) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        let Some(unit) = self.board.unit(selected) else {
            self.clear_selection();
            return false;
        };
        if unit.faction != Faction::Player {
            return false;
        }
        if hit == Some(selected) {
            self.clear_selection();
            return true;
        }

        let can_move = unit.can_move();
        let can_attack = unit.can_attack();

        if self.move_highlights.contains(&pos) && can_move {
            let from = unit.pos;
            if self.board.move_unit(selected, pos) {
                self.try_promote(selected);
                if let Some(u) = self.board.unit_mut(selected) {
                    u.flags.remove(ActionFlags::CAN_MOVE);
                }
                self.events.push(EncounterEvent::UnitMoved {
                    unit: selected,
                    from,
                    to: pos,
                });
                self.recompute_selection_highlights();
            }
            return true;
        }

        if self.attack_highlights.contains(&pos) && can_attack {
            let is_enemy = self
                .board
                .at(pos)
                .is_some_and(|u| u.faction == Faction::Enemy);
            if !is_enemy {
                self.message("Select an enemy to attack.");
                return true;
            }
            self.resolve_player_attack(selected, pos);
            return true;
        }

        if let Some(hit_id) = hit {
            if self.board.unit(hit_id).is_some_and(|u| u.faction == Faction::Player) {
                self.selected = Some(hit_id);
                self.recompute_selection_highlights();
                return true;
            }
        }
        false
    }

    /// Melee pieces hit only the clicked cell of their pattern; sliders sweep
    /// the whole pattern.
    fn resolve_player_attack(&mut self, attacker: UnitId, clicked: GridPos) {
        let Some(unit) = self.board.unit(attacker) else {
            return;
        };
        let melee = is_melee(unit.kind);
        let tiles = rules::attack_tiles(&self.board, unit);
        self.events.push(EncounterEvent::AttackStarted {
            attacker,
            squares: tiles.clone(),
        });

        let mut hit_any = false;
        for sq in tiles {
            if melee && sq != clicked {
                continue;
            }
            let Some(target) = self.board.at(sq) else {
                continue;
            };
            if target.faction == Faction::Player {
                continue;
            }
            let target_id = target.id;
            let damage = self.outgoing_damage(attacker);
            self.board.apply_damage(target_id, damage);
            self.events.push(EncounterEvent::DamageDealt {
                unit: target_id,
                amount: damage,
            });
            hit_any = true;
        }

        self.events.push(EncounterEvent::AttackResolved { attacker });
        if !hit_any {
            self.message("No enemy hit.");
            return;
        }

        if let Some(u) = self.board.unit_mut(attacker) {
            u.flags.remove(ActionFlags::CAN_ATTACK | ActionFlags::CAN_MOVE);
        }
        self.trim_stale_plan();
        self.clear_selection();
        self.check_win_lose();
    }

    /// Consumed per swing: base attack plus the one-shot modifier, floor 0.
    pub(crate) fn outgoing_damage(&mut self, attacker: UnitId) -> i32 {
        let Some(unit) = self.board.unit_mut(attacker) else {
            return 0;
        };
        (unit.attack.max(0) + unit.status.take_attack_modifier()).max(0)
    }

    // ----- phase plumbing -----

    fn begin_player_phase(&mut self) {
        self.reset_player_actions();
        self.deck.draw_fresh_turn_hand(&mut self.deck_rng);
        self.events.push(EncounterEvent::HandChanged);
        self.rebuild_intents();
        self.turn.begin_player_round();
        self.events.push(EncounterEvent::PhaseChanged {
            phase: TurnPhase::Player,
            round: self.turn.round,
        });
    }

    fn reset_player_actions(&mut self) {
        let ids: Vec<UnitId> = self
            .board
            .faction_units(Faction::Player)
            .filter(|u| !u.is_structure)
            .map(|u| u.id)
            .collect();
        for id in ids {
            if let Some(u) = self.board.unit_mut(id) {
                u.flags = ActionFlags::CAN_MOVE | ActionFlags::CAN_ATTACK;
            }
        }
    }

    pub(crate) fn rebuild_intents(&mut self) {
        let planner = IntentPlanner::new(&self.board, self.content.as_ref())
            .with_weights(self.weights);
        self.plan = Some(planner.build_plan());
        self.events.push(EncounterEvent::IntentsRebuilt);
    }

    /// Drops intents whose actor died to a player action mid-phase, keeping
    /// the surviving telegraphs accurate without re-scoring.
    fn trim_stale_plan(&mut self) {
        let planner = IntentPlanner::new(&self.board, self.content.as_ref())
            .with_weights(self.weights);
        self.plan = Some(planner.validate_or_recompute(self.plan.take()));
    }

    pub(crate) fn tick_statuses(&mut self, faction: Faction) {
        let ids: Vec<UnitId> = self.board.faction_units(faction).map(|u| u.id).collect();
        for id in ids {
            let mut poisoned = false;
            if let Some(u) = self.board.unit_mut(id) {
                u.status.sleeping_turns = u.status.sleeping_turns.saturating_sub(1);
                u.status.rooted_turns = u.status.rooted_turns.saturating_sub(1);
                if u.status.poisoned_turns > 0 {
                    u.status.poisoned_turns -= 1;
                    poisoned = true;
                }
            }
            if poisoned {
                self.board.apply_damage(id, 1);
                self.events.push(EncounterEvent::DamageDealt { unit: id, amount: 1 });
            }
        }
    }

    pub(crate) fn try_promote(&mut self, id: UnitId) {
        let size = self.board.size();
        let Some(unit) = self.board.unit_mut(id) else {
            return;
        };
        if unit.kind != UnitKind::Pawn || unit.status.promoted {
            return;
        }
        if unit.pos.row != rules::promotion_row(unit.faction, size) {
            return;
        }
        unit.status.promoted = true;
        self.events.push(EncounterEvent::UnitPromoted { unit: id });
        self.message(format!("{id} promoted."));
    }

    pub(crate) fn check_win_lose(&mut self) {
        if self.resolved {
            return;
        }
        let node_id = self
            .active_node
            .as_ref()
            .map(|n| n.id.clone())
            .unwrap_or_default();

        let Some(king) = self.board.find_king() else {
            self.message("Game over: King dead.");
            self.resolved = true;
            self.events.push(EncounterEvent::EncounterResolved {
                won: false,
                node_id,
            });
            return;
        };
        let king_hp = king.hp;

        if self.board.faction_units(Faction::Enemy).next().is_none() {
            self.session.king_hp = king_hp;
            self.session.mark_node_complete(&node_id);
            self.message("Encounter won.");
            self.resolved = true;
            self.events.push(EncounterEvent::EncounterResolved {
                won: true,
                node_id,
            });
        }
    }

    // ----- selection -----

    fn clear_selection(&mut self) {
        self.selected = None;
        self.move_highlights.clear();
        self.attack_highlights.clear();
    }

    fn recompute_selection_highlights(&mut self) {
        self.move_highlights.clear();
        self.attack_highlights.clear();
        let Some(id) = self.selected else {
            return;
        };
        let Some(unit) = self.board.unit(id) else {
            return;
        };
        if unit.faction != Faction::Player || !self.turn.is_player_phase() {
            return;
        }
        if unit.can_move() {
            self.move_highlights
                .extend(rules::move_tiles(&self.board, unit));
        }
        if unit.can_attack() {
            // The whole pattern, occupied or not; clicking an empty pattern
            // cell warns instead of resolving.
            self.attack_highlights
                .extend(rules::attack_tiles(&self.board, unit));
        }
    }

    // ----- shared helpers -----

    fn require_player_phase(&self) -> Result<(), CommandError> {
        if self.active_node.is_none() {
            return Err(CommandError::NoActiveEncounter);
        }
        if self.resolved {
            return Err(CommandError::EncounterResolved);
        }
        if !self.turn.is_player_phase() {
            return Err(CommandError::NotPlayerPhase);
        }
        Ok(())
    }

    pub(crate) fn message(&mut self, text: impl Into<String>) {
        self.events.push(EncounterEvent::Message { text: text.into() });
    }

    pub(crate) fn special_roll_seed(&self, actor: UnitId) -> u64 {
        mix_seed(
            self.session.seed,
            u64::from(self.turn.round),
            actor.serial,
            SALT_SPECIAL,
        )
    }

    pub(crate) fn cave_pick_seed(&self, total_weight: u32) -> u64 {
        mix_seed(
            self.session.seed,
            u64::from(self.session.encounter_index),
            total_weight,
            SALT_CAVE,
        )
    }
}

fn is_melee(kind: UnitKind) -> bool {
    matches!(kind, UnitKind::Pawn | UnitKind::Knight | UnitKind::King)
}
