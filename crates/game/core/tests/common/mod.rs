#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use tactics_core::{
    CardDefinition, CardKind, CaveTemplate, ContentOracle, EncounterController, EncounterTemplate,
    EnemyBehavior, EnemySpecial, Faction, GridPos, NodeType, Placement, RunNode, SessionState,
    SpecialEffect, UnitKind, UnitProfile,
};

/// Oracle with explicit per-test tables; anything absent falls back to the
/// engine defaults (1/1 stats, adjacent melee, no special).
#[derive(Clone, Debug, Default)]
pub struct TestContent {
    pub template: EncounterTemplate,
    pub profiles: BTreeMap<UnitKind, UnitProfile>,
    pub behaviors: BTreeMap<UnitKind, EnemyBehavior>,
    pub specials: BTreeMap<UnitKind, EnemySpecial>,
    pub deck: Vec<CardDefinition>,
}

impl TestContent {
    pub fn on_board(size: i32) -> Self {
        Self {
            template: EncounterTemplate {
                board_size: size,
                ..EncounterTemplate::default()
            },
            ..Self::default()
        }
    }

    pub fn with_enemy(mut self, kind: UnitKind, row: i32, col: i32) -> Self {
        self.template.enemies.push(Placement {
            kind,
            faction: Faction::Enemy,
            pos: GridPos::new(row, col),
        });
        self
    }

    pub fn with_player(mut self, kind: UnitKind, row: i32, col: i32) -> Self {
        self.template.player_extras.push(Placement {
            kind,
            faction: Faction::Player,
            pos: GridPos::new(row, col),
        });
        self
    }

    pub fn with_cave(mut self, cave: CaveTemplate) -> Self {
        self.template.caves.push(cave);
        self
    }

    pub fn with_profile(mut self, kind: UnitKind, max_hp: i32, attack: i32) -> Self {
        self.profiles.insert(kind, UnitProfile { max_hp, attack });
        self
    }

    pub fn with_behavior(mut self, kind: UnitKind, behavior: EnemyBehavior) -> Self {
        self.behaviors.insert(kind, behavior);
        self
    }

    pub fn with_special(
        mut self,
        kind: UnitKind,
        effect: SpecialEffect,
        chance_percent: u32,
        amount: i32,
        turns: u8,
    ) -> Self {
        self.specials.insert(
            kind,
            EnemySpecial {
                effect,
                chance_percent,
                amount,
                turns,
            },
        );
        self
    }

    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.deck.push(card);
        self
    }
}

impl ContentOracle for TestContent {
    fn unit_profile(&self, kind: UnitKind) -> UnitProfile {
        self.profiles.get(&kind).copied().unwrap_or_default()
    }

    fn enemy_behavior(&self, kind: UnitKind) -> EnemyBehavior {
        self.behaviors.get(&kind).copied().unwrap_or_default()
    }

    fn enemy_special(&self, kind: UnitKind) -> Option<EnemySpecial> {
        self.specials.get(&kind).copied()
    }

    fn starter_deck(&self) -> Vec<CardDefinition> {
        self.deck.clone()
    }

    fn encounter(&self, _node_id: &str) -> Option<EncounterTemplate> {
        Some(self.template.clone())
    }
}

pub fn battle(id: &str) -> RunNode {
    RunNode {
        id: id.to_owned(),
        node_type: NodeType::Battle,
    }
}

pub fn controller(content: TestContent, seed: u64) -> EncounterController {
    EncounterController::new(Arc::new(content), SessionState::new(seed, 5))
}

pub fn card(id: &str, kind: CardKind, summon_kind: Option<UnitKind>) -> CardDefinition {
    CardDefinition {
        id: id.to_owned(),
        name: id.to_owned(),
        kind,
        summon_kind,
        cost: 1,
        amount: 1,
    }
}
