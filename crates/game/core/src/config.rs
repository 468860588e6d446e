/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Cards kept in hand at the start of each player turn.
    pub hand_size: usize,
    /// Energy granted at the start of each player round.
    pub energy_per_round: i32,
    /// Energy pool ceiling; regeneration never exceeds it.
    pub max_energy: i32,
    /// King hp cap; persistent hp entering an encounter is clamped to this.
    pub king_max_hp: i32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard cap on cards held at once, sized for the bounded hand storage.
    pub const MAX_HAND: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_SIZE: usize = 4;
    pub const DEFAULT_ENERGY_PER_ROUND: i32 = 3;
    pub const DEFAULT_MAX_ENERGY: i32 = 5;
    pub const DEFAULT_KING_MAX_HP: i32 = 5;
    /// Board side length when the content table names none.
    pub const DEFAULT_BOARD_SIZE: i32 = 4;
    /// Fallback stats for unit kinds missing from the content table.
    pub const DEFAULT_HP: i32 = 1;
    pub const DEFAULT_ATTACK: i32 = 1;

    pub fn new() -> Self {
        Self {
            hand_size: Self::DEFAULT_HAND_SIZE,
            energy_per_round: Self::DEFAULT_ENERGY_PER_ROUND,
            max_energy: Self::DEFAULT_MAX_ENERGY,
            king_max_hp: Self::DEFAULT_KING_MAX_HP,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
