use std::fmt;

/// Discrete board coordinate expressed as (row, col).
///
/// Row 0 is the far rank from the player's perspective; player pieces advance
/// toward row 0, enemy units advance toward `size - 1`. The derived `Ord` makes
/// the type usable directly as a deterministic map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: GridPos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Unit direction toward `to`, snapped to the dominant axis (rows win ties).
    ///
    /// Returns `(0, 0)` when the positions coincide.
    pub fn direction_toward(self, to: GridPos) -> (i32, i32) {
        let dr = to.row - self.row;
        let dc = to.col - self.col;
        if dr.abs() >= dc.abs() {
            (dr.signum(), 0)
        } else {
            (0, dc.signum())
        }
    }

    /// Single greedy step toward `to` along the dominant axis.
    pub fn step_toward(self, to: GridPos) -> GridPos {
        let (dr, dc) = self.direction_toward(to);
        GridPos::new(self.row + dr, self.col + dc)
    }

    pub fn offset(self, dr: i32, dc: i32) -> GridPos {
        GridPos::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Ownership tag on a unit; determines targeting eligibility.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Enemy,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(2, 3);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
    }

    #[test]
    fn step_toward_prefers_rows_on_ties() {
        let from = GridPos::new(0, 0);
        let to = GridPos::new(2, 2);
        assert_eq!(from.step_toward(to), GridPos::new(1, 0));
    }

    #[test]
    fn step_toward_self_is_identity() {
        let p = GridPos::new(3, 1);
        assert_eq!(p.step_toward(p), p);
    }
}
