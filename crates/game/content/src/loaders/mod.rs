//! Loaders for reading content from RON data files.
//!
//! Each loader turns one file into the corresponding `tactics-core` content
//! type; an oracle built on top of these can serve authored campaigns
//! without recompiling. Parsing is separated from file IO so tests can feed
//! literals straight to `parse`.

pub mod deck;
pub mod encounter;

pub use deck::DeckLoader;
pub use encounter::EncounterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
