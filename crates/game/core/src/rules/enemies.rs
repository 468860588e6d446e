//! Data-driven attack shapes and movement candidates for enemy units.

use crate::env::{AttackMode, EnemyBehavior, MoveMode};
use crate::state::{BoardState, GridPos, Unit, UnitKind};

use super::{KNIGHT_LEAPS, NEIGHBORS_8, ORTHOGONAL, offsets_from};

/// Cells the enemy threatens from `from`, facing `target`.
///
/// Shapes are evaluated relative to the dominant-axis direction toward the
/// target; a unit standing on its target's cell faces the far rank. Promoted
/// pawns override their table entry with the full 8-neighbor shape. All
/// returned cells are inside the board.
pub fn enemy_attack_squares(
    board: &BoardState,
    unit: &Unit,
    behavior: &EnemyBehavior,
    from: GridPos,
    target: GridPos,
) -> Vec<GridPos> {
    let mode = if unit.kind == UnitKind::Pawn && unit.status.promoted {
        AttackMode::Adjacent8
    } else {
        behavior.attack_mode
    };
    let facing = facing(from, target);
    let mut out = Vec::new();
    match mode {
        AttackMode::Adjacent4 => {
            for p in offsets_from(from, &ORTHOGONAL) {
                push_if_inside(board, p, &mut out);
            }
        }
        AttackMode::Adjacent8 => {
            for p in offsets_from(from, &NEIGHBORS_8) {
                push_if_inside(board, p, &mut out);
            }
        }
        AttackMode::LinearProjectile => {
            let mut p = from;
            for _ in 0..behavior.attack_range.max(1) {
                p = p.offset(facing.0, facing.1);
                if !board.inside(p) {
                    break;
                }
                out.push(p);
            }
        }
        AttackMode::FrontCone => {
            let perp = perpendicular(facing);
            let ahead = from.offset(facing.0, facing.1);
            push_if_inside(board, ahead, &mut out);
            push_if_inside(board, ahead.offset(perp.0, perp.1), &mut out);
            push_if_inside(board, ahead.offset(-perp.0, -perp.1), &mut out);
        }
        AttackMode::FrontCluster => {
            let perp = perpendicular(facing);
            let ahead = from.offset(facing.0, facing.1);
            push_if_inside(board, ahead, &mut out);
            push_if_inside(board, ahead.offset(perp.0, perp.1), &mut out);
            push_if_inside(board, from.offset(perp.0, perp.1), &mut out);
            push_if_inside(board, ahead.offset(-perp.0, -perp.1), &mut out);
        }
        AttackMode::VerticalPair => {
            push_if_inside(board, from.offset(1, 0), &mut out);
            push_if_inside(board, from.offset(-1, 0), &mut out);
        }
        AttackMode::RayToEdge => {
            // Includes the first occupied cell, then stops; the executor
            // additionally stops damage there regardless of faction.
            let mut p = from.offset(facing.0, facing.1);
            while board.inside(p) {
                out.push(p);
                if board.occupied(p) {
                    break;
                }
                p = p.offset(facing.0, facing.1);
            }
        }
    }
    out
}

/// Candidate destinations for the enemy moving toward `target`. Only current
/// occupancy constrains candidates; cells claimed by earlier intents are a
/// scoring concern of the planner, not a geometric one.
pub fn enemy_move_candidates(
    board: &BoardState,
    unit: &Unit,
    behavior: &EnemyBehavior,
    target: GridPos,
) -> Vec<GridPos> {
    if unit.status.is_rooted() {
        return Vec::new();
    }
    let mut out = Vec::new();
    match behavior.move_mode {
        MoveMode::Step => {
            // Greedy axis walk; a blocked step ends the walk (no detours).
            let mut p = unit.pos;
            for _ in 0..behavior.move_range.max(0) {
                let next = p.step_toward(target);
                if next == p || !board.inside(next) || board.occupied(next) {
                    break;
                }
                out.push(next);
                p = next;
            }
        }
        MoveMode::Leap => {
            for p in offsets_from(unit.pos, &KNIGHT_LEAPS) {
                if board.inside(p) && !board.occupied(p) {
                    out.push(p);
                }
            }
        }
        MoveMode::Fly => {
            // Straight flight over intermediate units; only the landing cell
            // must be free.
            let facing = facing(unit.pos, target);
            let mut p = unit.pos;
            for _ in 0..behavior.move_range.max(0) {
                p = p.offset(facing.0, facing.1);
                if !board.inside(p) {
                    break;
                }
                if !board.occupied(p) {
                    out.push(p);
                }
            }
        }
    }
    out
}

fn facing(from: GridPos, target: GridPos) -> (i32, i32) {
    let dir = from.direction_toward(target);
    if dir == (0, 0) { (1, 0) } else { dir }
}

fn perpendicular(dir: (i32, i32)) -> (i32, i32) {
    (dir.1, dir.0)
}

fn push_if_inside(board: &BoardState, p: GridPos, out: &mut Vec<GridPos>) {
    if board.inside(p) {
        out.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Faction, UnitId};

    fn enemy(kind: UnitKind, pos: GridPos) -> Unit {
        Unit::new(UnitId::new(Faction::Enemy, kind, 1), pos, 2, 1)
    }

    fn behavior(attack_mode: AttackMode, attack_range: i32, move_mode: MoveMode) -> EnemyBehavior {
        EnemyBehavior {
            attack_mode,
            attack_range,
            move_mode,
            move_range: 1,
        }
    }

    #[test]
    fn linear_projectile_points_at_target() {
        let board = BoardState::new(5);
        let bat = enemy(UnitKind::Bat, GridPos::new(0, 2));
        let b = behavior(AttackMode::LinearProjectile, 2, MoveMode::Fly);
        let squares = enemy_attack_squares(&board, &bat, &b, bat.pos, GridPos::new(4, 2));
        assert_eq!(squares, vec![GridPos::new(1, 2), GridPos::new(2, 2)]);
    }

    #[test]
    fn front_cone_faces_the_target() {
        let board = BoardState::new(5);
        let coyote = enemy(UnitKind::Coyote, GridPos::new(1, 2));
        let b = behavior(AttackMode::FrontCone, 1, MoveMode::Step);
        let squares = enemy_attack_squares(&board, &coyote, &b, coyote.pos, GridPos::new(4, 2));
        assert_eq!(
            squares,
            vec![GridPos::new(2, 2), GridPos::new(2, 3), GridPos::new(2, 1)]
        );
    }

    #[test]
    fn ray_to_edge_stops_at_first_unit() {
        let mut board = BoardState::new(5);
        board.add(enemy(UnitKind::Boar, GridPos::new(3, 2)));
        let owl = enemy(UnitKind::Owl, GridPos::new(0, 2));
        let b = behavior(AttackMode::RayToEdge, 1, MoveMode::Fly);
        let squares = enemy_attack_squares(&board, &owl, &b, owl.pos, GridPos::new(4, 2));
        assert_eq!(
            squares,
            vec![GridPos::new(1, 2), GridPos::new(2, 2), GridPos::new(3, 2)]
        );
    }

    #[test]
    fn promoted_pawn_overrides_table_with_adjacent_8() {
        let board = BoardState::new(5);
        let mut pawn = enemy(UnitKind::Pawn, GridPos::new(2, 2));
        pawn.status.promoted = true;
        let b = behavior(AttackMode::Adjacent4, 1, MoveMode::Step);
        let squares = enemy_attack_squares(&board, &pawn, &b, pawn.pos, GridPos::new(4, 2));
        assert_eq!(squares.len(), 8);
    }

    #[test]
    fn step_walk_ends_at_the_first_occupied_cell() {
        let mut board = BoardState::new(5);
        let boar = enemy(UnitKind::Boar, GridPos::new(0, 2));
        let b = EnemyBehavior {
            move_range: 2,
            ..EnemyBehavior::default()
        };
        let free = enemy_move_candidates(&board, &boar, &b, GridPos::new(4, 2));
        assert_eq!(free, vec![GridPos::new(1, 2), GridPos::new(2, 2)]);
        board.add(enemy(UnitKind::Bat, GridPos::new(1, 2)));
        let blocked = enemy_move_candidates(&board, &boar, &b, GridPos::new(4, 2));
        assert!(blocked.is_empty(), "no detours around a blocked step");
    }

    #[test]
    fn flyers_pass_over_units_but_need_a_free_landing_cell() {
        let mut board = BoardState::new(5);
        board.add(enemy(UnitKind::Boar, GridPos::new(1, 2)));
        let bat = enemy(UnitKind::Bat, GridPos::new(0, 2));
        let b = EnemyBehavior {
            move_mode: MoveMode::Fly,
            move_range: 2,
            ..EnemyBehavior::default()
        };
        let candidates = enemy_move_candidates(&board, &bat, &b, GridPos::new(4, 2));
        assert_eq!(candidates, vec![GridPos::new(2, 2)]);
    }

    #[test]
    fn rooted_units_get_no_move_candidates() {
        let board = BoardState::new(5);
        let mut boar = enemy(UnitKind::Boar, GridPos::new(0, 2));
        boar.status.rooted_turns = 1;
        let candidates =
            enemy_move_candidates(&board, &boar, &EnemyBehavior::default(), GridPos::new(4, 2));
        assert!(candidates.is_empty());
    }
}
