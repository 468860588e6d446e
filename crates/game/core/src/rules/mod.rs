//! Movement and attack geometry.
//!
//! Pure functions of unit kind, position and board occupancy. Two flavors per
//! kind: move tiles (destination must be empty) and attack tiles (cell may be
//! occupied; an attack tile is live only while it holds a valid target).
//! Output order is fixed per kind so downstream tie-breaks stay deterministic.

mod enemies;
mod pieces;

pub use enemies::{enemy_attack_squares, enemy_move_candidates};
pub use pieces::{attack_tiles, forward_row_delta, move_tiles, promotion_row};

use crate::state::GridPos;

pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const NEIGHBORS_8: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const KNIGHT_LEAPS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) fn offsets_from(
    origin: GridPos,
    offsets: &[(i32, i32)],
) -> impl Iterator<Item = GridPos> + '_ {
    offsets.iter().map(move |&(dr, dc)| origin.offset(dr, dc))
}
