//! The built-in prototype campaign.
//!
//! One oracle over four static tables: piece stat lines, enemy behaviors and
//! specials, the starter deck, and the ten scripted encounters. Everything is
//! plain functions over `match` tables so the data reads like the design
//! sheet it came from.

pub mod cards;
pub mod encounters;
pub mod enemies;
pub mod pieces;

use tactics_core::{
    CardDefinition, ContentOracle, EncounterTemplate, EnemyBehavior, EnemySpecial, GameConfig,
    UnitKind, UnitProfile,
};

/// Content oracle backed by the built-in campaign tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrototypeContent;

impl ContentOracle for PrototypeContent {
    fn unit_profile(&self, kind: UnitKind) -> UnitProfile {
        pieces::profile(kind)
    }

    fn enemy_behavior(&self, kind: UnitKind) -> EnemyBehavior {
        enemies::behavior(kind)
    }

    fn enemy_special(&self, kind: UnitKind) -> Option<EnemySpecial> {
        enemies::special(kind)
    }

    fn rules(&self) -> GameConfig {
        GameConfig::default()
    }

    fn starter_deck(&self) -> Vec<CardDefinition> {
        cards::starter_deck()
    }

    fn encounter(&self, node_id: &str) -> Option<EncounterTemplate> {
        encounters::template(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_a_sane_profile() {
        let oracle = PrototypeContent;
        for kind in UnitKind::iter() {
            let profile = oracle.unit_profile(kind);
            assert!(profile.max_hp >= 1, "{kind} has no hp");
            assert!(profile.attack >= 0, "{kind} has negative attack");
        }
    }

    #[test]
    fn structures_never_attack() {
        let oracle = PrototypeContent;
        assert_eq!(oracle.unit_profile(UnitKind::Rock).attack, 0);
        assert_eq!(oracle.unit_profile(UnitKind::Cave).attack, 0);
    }

    #[test]
    fn starter_deck_is_affordable() {
        let oracle = PrototypeContent;
        let deck = oracle.starter_deck();
        assert!(!deck.is_empty());
        let max_energy = oracle.rules().max_energy;
        for card in &deck {
            assert!(card.cost >= 1 && card.cost <= max_energy, "{}", card.id);
        }
    }

    #[test]
    fn known_encounters_resolve() {
        let oracle = PrototypeContent;
        assert!(oracle.encounter("E01").is_some());
        assert!(oracle.encounter("E10").is_some());
        assert!(oracle.encounter("E11").is_none());
        assert!(oracle.encounter("tavern").is_none());
    }
}
