//! Static content tables and file loaders for the tactics engine.
//!
//! [`PrototypeContent`] is the built-in campaign: stat lines, enemy behaviors
//! and specials, the starter deck and the ten-battle encounter list, all
//! served through the `tactics-core` [`ContentOracle`](tactics_core::ContentOracle)
//! seam. The optional `loaders` feature adds RON loaders so decks and
//! encounter layouts can come from data files instead.
//!
//! Content is consumed through the oracle and never appears in game state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::PrototypeContent;

#[cfg(feature = "loaders")]
pub use loaders::{DeckLoader, EncounterLoader, LoadResult};
