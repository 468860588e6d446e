/// Kind of node on the run map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    Battle,
    Elite,
    Boss,
    Enemy,
    Shop,
    Event,
    Rest,
    Merchant,
    Treasure,
    Unknown,
}

impl NodeType {
    /// Battle-like nodes start an encounter; everything else resolves
    /// immediately when entered.
    pub fn is_battle(self) -> bool {
        matches!(
            self,
            NodeType::Battle | NodeType::Elite | NodeType::Boss | NodeType::Enemy
        )
    }
}

/// A node the run map hands to the engine when entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunNode {
    pub id: String,
    pub node_type: NodeType,
}

/// Run-level state that survives between encounters.
///
/// Plain data for an external persistence layer; the engine mutates it
/// through [`SessionState::mark_node_complete`] and by syncing the King's hp
/// at encounter end.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub seed: u64,
    /// King hp carried from one encounter into the next.
    pub king_hp: i32,
    pub king_max_hp: i32,
    pub gold: u32,
    pub trinkets: Vec<String>,
    pub last_completed_node: Option<String>,
    pub encounter_index: u32,
}

impl SessionState {
    pub fn new(seed: u64, king_max_hp: i32) -> Self {
        Self {
            seed,
            king_hp: king_max_hp,
            king_max_hp,
            gold: 0,
            trinkets: Vec::new(),
            last_completed_node: None,
            encounter_index: 0,
        }
    }

    /// Records a finished node and advances the encounter counter.
    pub fn mark_node_complete(&mut self, node_id: &str) {
        self.last_completed_node = Some(node_id.to_owned());
        self.encounter_index += 1;
    }

    /// King hp entering a new encounter, clamped into `1..=king_max_hp`.
    pub fn king_spawn_hp(&self) -> i32 {
        self.king_hp.clamp(1, self.king_max_hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_spawn_hp_is_clamped() {
        let mut session = SessionState::new(7, 5);
        session.king_hp = 0;
        assert_eq!(session.king_spawn_hp(), 1);
        session.king_hp = 9;
        assert_eq!(session.king_spawn_hp(), 5);
        session.king_hp = 3;
        assert_eq!(session.king_spawn_hp(), 3);
    }

    #[test]
    fn mark_node_complete_advances_the_run() {
        let mut session = SessionState::new(7, 5);
        session.mark_node_complete("n1");
        assert_eq!(session.last_completed_node.as_deref(), Some("n1"));
        assert_eq!(session.encounter_index, 1);
    }

    #[test]
    fn only_battle_like_nodes_start_encounters() {
        assert!(NodeType::Battle.is_battle());
        assert!(NodeType::Boss.is_battle());
        assert!(!NodeType::Shop.is_battle());
        assert!(!NodeType::Rest.is_battle());
    }
}
