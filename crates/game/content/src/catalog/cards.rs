//! The starter deck.

use tactics_core::{CardDefinition, CardKind, UnitKind};

fn card(
    id: &str,
    name: &str,
    kind: CardKind,
    summon_kind: Option<UnitKind>,
    cost: i32,
    amount: i32,
) -> CardDefinition {
    CardDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        kind,
        summon_kind,
        cost,
        amount,
    }
}

/// Nine cards: two pawns, two bigger summons, a heal, a shield, two traps
/// and a barricade. Duplicate pawn summons keep early hands from whiffing.
pub fn starter_deck() -> Vec<CardDefinition> {
    vec![
        card("heal_small", "Heal Small", CardKind::Heal, None, 1, 1),
        card("shield", "Shield", CardKind::Shield, None, 1, 1),
        card(
            "summon_pawn_a",
            "Summon Pawn",
            CardKind::Summon,
            Some(UnitKind::Pawn),
            1,
            1,
        ),
        card(
            "summon_pawn_b",
            "Summon Pawn",
            CardKind::Summon,
            Some(UnitKind::Pawn),
            1,
            1,
        ),
        card(
            "summon_knight",
            "Summon Knight",
            CardKind::Summon,
            Some(UnitKind::Knight),
            2,
            1,
        ),
        card(
            "summon_bishop",
            "Summon Bishop",
            CardKind::Summon,
            Some(UnitKind::Bishop),
            2,
            1,
        ),
        card("bear_trap", "Bear Trap", CardKind::BearTrap, None, 1, 1),
        card("barricade", "Barricade", CardKind::Barricade, None, 1, 1),
        card("spike_pit", "Spike Pit", CardKind::SpikePit, None, 1, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_ids_are_unique() {
        let deck = starter_deck();
        let mut ids: Vec<&str> = deck.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn summons_carry_a_kind_and_nothing_else_does() {
        for c in starter_deck() {
            assert_eq!(c.kind == CardKind::Summon, c.summon_kind.is_some(), "{}", c.id);
        }
    }
}
