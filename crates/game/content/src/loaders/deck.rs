//! Deck list loader.

use std::path::Path;

use tactics_core::CardDefinition;

use crate::loaders::{LoadResult, read_file};

/// Loader for card lists from RON files.
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a RON file holding a list of card definitions.
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CardDefinition>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse deck RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::CardKind;

    #[test]
    fn parses_a_deck_list() {
        let ron = r#"[
            (
                id: "heal_small",
                name: "Heal Small",
                kind: Heal,
                summon_kind: None,
                cost: 1,
                amount: 1,
            ),
            (
                id: "summon_pawn",
                name: "Summon Pawn",
                kind: Summon,
                summon_kind: Some(Pawn),
                cost: 1,
                amount: 1,
            ),
        ]"#;
        let deck = DeckLoader::parse(ron).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck[0].kind, CardKind::Heal);
        assert_eq!(deck[1].summon_kind, Some(tactics_core::UnitKind::Pawn));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(DeckLoader::parse("[(id: 7)]").is_err());
    }
}
