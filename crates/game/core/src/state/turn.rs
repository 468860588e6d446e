use std::fmt;

/// Whose half of the round is active.
///
/// Enemy resolution is synchronous, so external observers only ever see the
/// state at rest in one of these two phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    Player,
    Enemy,
}

/// Round counter and the player's energy pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,
    pub round: u32,
    pub energy: i32,
    pub energy_per_round: i32,
    pub max_energy: i32,
}

impl TurnState {
    pub fn new(energy_per_round: i32, max_energy: i32) -> Self {
        Self {
            phase: TurnPhase::Player,
            round: 1,
            energy: energy_per_round.min(max_energy),
            energy_per_round,
            max_energy,
        }
    }

    pub fn is_player_phase(&self) -> bool {
        self.phase == TurnPhase::Player
    }

    /// Spends energy if enough is available; no partial spend.
    pub fn try_spend(&mut self, cost: i32) -> bool {
        if cost > self.energy {
            return false;
        }
        self.energy -= cost;
        true
    }

    /// Starts a new player round: regenerate energy capped at the maximum and
    /// bump the round counter.
    pub fn begin_player_round(&mut self) {
        self.phase = TurnPhase::Player;
        self.energy = (self.energy + self.energy_per_round).min(self.max_energy);
        self.round += 1;
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {} ({}) energy {}/{}",
            self.round, self.phase, self.energy, self.max_energy
        )
    }
}
