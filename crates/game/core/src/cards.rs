//! Card definitions, deck/hand zones and the play seam.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::rng::SessionRng;
use crate::state::{GridPos, UnitId, UnitKind};

/// What a card does when it resolves on a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardKind {
    /// Places a friendly unit on an empty back-zone cell.
    Summon,
    /// Restores hp to a friendly unit.
    Heal,
    /// Grants a friendly unit a shield charge.
    Shield,
    /// Places a damaging trap in the middle band.
    BearTrap,
    /// Places a damage-plus-sleep trap in the middle band.
    SpikePit,
    /// Places a Rock structure on an empty back-zone cell.
    Barricade,
}

/// Static card data handed out by the content oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub kind: CardKind,
    /// Unit placed by Summon cards; ignored otherwise.
    pub summon_kind: Option<UnitKind>,
    pub cost: i32,
    /// Heal amount, shield charges, trap damage or sleep turns depending on kind.
    pub amount: i32,
}

/// Seam through which resolved card effects reach the encounter.
///
/// Keeps the deck machinery free of board knowledge; the encounter controller
/// implements this and routes effects into board/trap state.
pub trait CardPlaySink {
    fn heal_unit(&mut self, target: UnitId, amount: i32);
    fn shield_unit(&mut self, target: UnitId, charges: i32);
    fn summon_unit(&mut self, kind: UnitKind, at: GridPos);
    fn place_barricade(&mut self, at: GridPos);
    fn place_trap(&mut self, at: GridPos, damage: i32, sleep_turns: u8);
}

/// Draw pile, discard pile and the bounded hand.
///
/// All three zones hold full card definitions so the deck works without
/// content lookups after construction.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckState {
    draw: Vec<CardDefinition>,
    discard: Vec<CardDefinition>,
    hand: ArrayVec<CardDefinition, { GameConfig::MAX_HAND }>,
    hand_size: usize,
}

impl DeckState {
    /// Builds a fresh deck from the starter list, shuffled once.
    pub fn configure(starter: Vec<CardDefinition>, hand_size: usize, rng: &mut SessionRng) -> Self {
        let mut draw = starter;
        rng.shuffle(&mut draw);
        Self {
            draw,
            discard: Vec::new(),
            hand: ArrayVec::new(),
            hand_size: hand_size.min(GameConfig::MAX_HAND),
        }
    }

    pub fn hand(&self) -> &[CardDefinition] {
        &self.hand
    }

    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Tops the hand up to the configured size.
    ///
    /// When the draw pile empties the discard pile is reshuffled into it;
    /// when both are empty the draw stops silently short.
    pub fn draw_fresh_turn_hand(&mut self, rng: &mut SessionRng) {
        while self.hand.len() < self.hand_size {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                std::mem::swap(&mut self.draw, &mut self.discard);
                rng.shuffle(&mut self.draw);
            }
            if let Some(card) = self.draw.pop() {
                self.hand.push(card);
            }
        }
    }

    /// Moves the whole hand to the discard pile.
    pub fn discard_hand(&mut self) {
        self.discard.extend(self.hand.drain(..));
    }

    /// Removes the card at `index` from hand into discard, returning a copy
    /// for effect resolution. Out-of-range indices return `None`.
    pub fn play_from_hand(&mut self, index: usize) -> Option<CardDefinition> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.discard.push(card.clone());
        Some(card)
    }
}
