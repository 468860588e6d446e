//! Encounter layout loader.

use std::collections::BTreeMap;
use std::path::Path;

use tactics_core::EncounterTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter layouts from RON files.
///
/// A file holds a map from node id to template, so one file can carry a
/// whole campaign's battle list.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, EncounterTemplate>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, EncounterTemplate>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}
