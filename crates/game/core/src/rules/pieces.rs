//! Chess-piece geometry for player-faction units (and enemy-held pieces).

use crate::state::{BoardState, Faction, GridPos, Unit, UnitKind};

use super::{KNIGHT_LEAPS, NEIGHBORS_8, offsets_from};

/// Row delta a pawn of this faction advances by. Player pieces push toward
/// row 0, enemy pieces toward the far rank.
pub fn forward_row_delta(faction: Faction) -> i32 {
    match faction {
        Faction::Player => -1,
        _ => 1,
    }
}

/// Back rank that promotes a pawn of this faction.
pub fn promotion_row(faction: Faction, size: i32) -> i32 {
    match faction {
        Faction::Player => 0,
        _ => size - 1,
    }
}

/// Cells the unit may move into this turn. Every returned cell is inside the
/// board and empty.
pub fn move_tiles(board: &BoardState, unit: &Unit) -> Vec<GridPos> {
    let mut tiles = Vec::new();
    match unit.kind {
        UnitKind::Pawn if !unit.status.promoted => {
            let forward = unit.pos.offset(forward_row_delta(unit.faction), 0);
            push_if_free(board, forward, &mut tiles);
        }
        UnitKind::Pawn | UnitKind::King => {
            for p in offsets_from(unit.pos, &NEIGHBORS_8) {
                push_if_free(board, p, &mut tiles);
            }
        }
        UnitKind::Knight => {
            for p in offsets_from(unit.pos, &KNIGHT_LEAPS) {
                push_if_free(board, p, &mut tiles);
            }
        }
        UnitKind::Bishop => slide_moves(board, unit.pos, &DIAGONALS, &mut tiles),
        UnitKind::Rook => slide_moves(board, unit.pos, &STRAIGHTS, &mut tiles),
        UnitKind::Queen => {
            slide_moves(board, unit.pos, &STRAIGHTS, &mut tiles);
            slide_moves(board, unit.pos, &DIAGONALS, &mut tiles);
        }
        _ => {}
    }
    tiles
}

/// Cells the unit threatens this turn. Cells may be occupied; sliders include
/// the first occupied cell of each ray and stop there.
///
/// The Knight deliberately threatens both its 8 neighbors and its 8 leap
/// squares: it can capture at leap range without landing there.
pub fn attack_tiles(board: &BoardState, unit: &Unit) -> Vec<GridPos> {
    let mut tiles = Vec::new();
    match unit.kind {
        UnitKind::Pawn if !unit.status.promoted => {
            let dr = forward_row_delta(unit.faction);
            push_if_inside(board, unit.pos.offset(dr, -1), &mut tiles);
            push_if_inside(board, unit.pos.offset(dr, 1), &mut tiles);
        }
        UnitKind::Pawn | UnitKind::King => {
            for p in offsets_from(unit.pos, &NEIGHBORS_8) {
                push_if_inside(board, p, &mut tiles);
            }
        }
        UnitKind::Knight => {
            for p in offsets_from(unit.pos, &NEIGHBORS_8) {
                push_if_inside(board, p, &mut tiles);
            }
            for p in offsets_from(unit.pos, &KNIGHT_LEAPS) {
                push_if_inside(board, p, &mut tiles);
            }
        }
        UnitKind::Bishop => slide_attacks(board, unit.pos, &DIAGONALS, &mut tiles),
        UnitKind::Rook => slide_attacks(board, unit.pos, &STRAIGHTS, &mut tiles),
        UnitKind::Queen => {
            slide_attacks(board, unit.pos, &STRAIGHTS, &mut tiles);
            slide_attacks(board, unit.pos, &DIAGONALS, &mut tiles);
        }
        _ => {}
    }
    tiles
}

const STRAIGHTS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn push_if_free(board: &BoardState, p: GridPos, out: &mut Vec<GridPos>) {
    if board.inside(p) && !board.occupied(p) {
        out.push(p);
    }
}

fn push_if_inside(board: &BoardState, p: GridPos, out: &mut Vec<GridPos>) {
    if board.inside(p) {
        out.push(p);
    }
}

fn slide_moves(board: &BoardState, from: GridPos, dirs: &[(i32, i32)], out: &mut Vec<GridPos>) {
    for &(dr, dc) in dirs {
        let mut p = from.offset(dr, dc);
        while board.inside(p) && !board.occupied(p) {
            out.push(p);
            p = p.offset(dr, dc);
        }
    }
}

fn slide_attacks(board: &BoardState, from: GridPos, dirs: &[(i32, i32)], out: &mut Vec<GridPos>) {
    for &(dr, dc) in dirs {
        let mut p = from.offset(dr, dc);
        while board.inside(p) {
            out.push(p);
            if board.occupied(p) {
                break;
            }
            p = p.offset(dr, dc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnitId;

    fn make(kind: UnitKind, faction: Faction, pos: GridPos) -> Unit {
        Unit::new(UnitId::new(faction, kind, 1), pos, 3, 1)
    }

    #[test]
    fn player_pawn_moves_one_row_forward() {
        let board = BoardState::new(4);
        let pawn = make(UnitKind::Pawn, Faction::Player, GridPos::new(2, 1));
        assert_eq!(move_tiles(&board, &pawn), vec![GridPos::new(1, 1)]);
    }

    #[test]
    fn enemy_pawn_moves_toward_far_rank() {
        let board = BoardState::new(4);
        let pawn = make(UnitKind::Pawn, Faction::Enemy, GridPos::new(1, 1));
        assert_eq!(move_tiles(&board, &pawn), vec![GridPos::new(2, 1)]);
    }

    #[test]
    fn promoted_pawn_gains_king_move_set() {
        let board = BoardState::new(4);
        let mut pawn = make(UnitKind::Pawn, Faction::Player, GridPos::new(1, 1));
        pawn.status.promoted = true;
        assert_eq!(move_tiles(&board, &pawn).len(), 8);
        assert_eq!(attack_tiles(&board, &pawn).len(), 8);
    }

    #[test]
    fn pawn_attacks_forward_diagonals_only() {
        let board = BoardState::new(4);
        let pawn = make(UnitKind::Pawn, Faction::Player, GridPos::new(2, 1));
        let attacks = attack_tiles(&board, &pawn);
        assert_eq!(attacks, vec![GridPos::new(1, 0), GridPos::new(1, 2)]);
    }

    #[test]
    fn knight_attacks_neighbors_and_leap_squares() {
        let board = BoardState::new(5);
        let knight = make(UnitKind::Knight, Faction::Player, GridPos::new(2, 2));
        let attacks = attack_tiles(&board, &knight);
        assert_eq!(attacks.len(), 16);
        // Capture at leap range without landing there.
        assert!(attacks.contains(&GridPos::new(0, 1)));
        assert!(attacks.contains(&GridPos::new(1, 2)));
        let moves = move_tiles(&board, &knight);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&GridPos::new(1, 2)));
    }

    #[test]
    fn rook_ray_stops_at_first_occupied_cell() {
        let mut board = BoardState::new(5);
        board.add(make(UnitKind::Pawn, Faction::Enemy, GridPos::new(2, 3)));
        let rook = make(UnitKind::Rook, Faction::Player, GridPos::new(2, 0));
        let moves = move_tiles(&board, &rook);
        assert!(moves.contains(&GridPos::new(2, 2)));
        assert!(!moves.contains(&GridPos::new(2, 3)));
        let attacks = attack_tiles(&board, &rook);
        assert!(attacks.contains(&GridPos::new(2, 3)));
        assert!(!attacks.contains(&GridPos::new(2, 4)));
    }

    #[test]
    fn structures_have_no_tiles() {
        let board = BoardState::new(4);
        let rock = make(UnitKind::Rock, Faction::Neutral, GridPos::new(2, 2));
        assert!(move_tiles(&board, &rock).is_empty());
        assert!(attack_tiles(&board, &rock).is_empty());
    }
}
