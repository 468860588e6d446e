//! The ten scripted battles, `E01` through `E10`.
//!
//! Difficulty ramps by index: bigger boards, tougher wildlife, and from the
//! fifth battle on a spawner cave that keeps reinforcements coming. Enemies
//! start on the top two rows; the player's King spawns on the bottom row.

use tactics_core::{
    CaveTemplate, EncounterTemplate, Faction, GridPos, Placement, SpawnWeight, UnitKind,
};

/// Looks up the template for a battle node id. Non-battle ids get `None`.
pub fn template(node_id: &str) -> Option<EncounterTemplate> {
    let index: u32 = node_id.strip_prefix('E')?.parse().ok()?;
    if !(1..=10).contains(&index) {
        return None;
    }
    let size = (4 + (index as i32 - 1) / 2).clamp(4, 8);
    let enemies = placements(index, size);
    let caves = caves(index, size, &enemies);
    Some(EncounterTemplate {
        board_size: size,
        enemies,
        player_extras: Vec::new(),
        caves,
    })
}

fn enemy(kind: UnitKind, row: i32, col: i32) -> Placement {
    Placement {
        kind,
        faction: Faction::Enemy,
        pos: GridPos::new(row, col),
    }
}

fn placements(index: u32, size: i32) -> Vec<Placement> {
    use UnitKind::*;
    let mid = size / 2;
    match index {
        1 => vec![enemy(Bat, 0, mid), enemy(Coyote, 1, mid)],
        2 => vec![enemy(Bat, 0, 1), enemy(Owl, 1, mid), enemy(Bat, 0, size - 2)],
        3 => vec![
            enemy(Boar, 0, mid),
            enemy(Spider, 1, 1),
            enemy(Snake, 1, size - 2),
        ],
        4 => vec![
            enemy(Skunk, 0, mid),
            enemy(Coyote, 1, 1),
            enemy(Coyote, 1, size - 2),
        ],
        5 => vec![
            enemy(Boar, 1, mid),
            enemy(Spider, 0, 1),
            enemy(Spider, 0, size - 2),
        ],
        6 => vec![
            enemy(WolfAlpha, 0, mid),
            enemy(WolfPup, 1, 1),
            enemy(WolfPup, 1, size - 2),
        ],
        7 => vec![
            enemy(Bear, 0, mid),
            enemy(Skunk, 1, 1),
            enemy(Snake, 1, size - 2),
        ],
        8 => vec![
            enemy(Bear, 0, mid),
            enemy(Toad, 1, 1),
            enemy(Toad, 1, size - 2),
        ],
        9 => vec![
            enemy(WolfAlpha, 0, 1),
            enemy(WolfAlpha, 0, size - 2),
            enemy(Bear, 1, mid),
        ],
        10 => vec![
            enemy(Bear, 0, mid),
            enemy(WolfAlpha, 1, 1),
            enemy(WolfAlpha, 1, size - 2),
            enemy(Skunk, 0, 0),
        ],
        _ => Vec::new(),
    }
}

/// Battles five and up get one cave on the top row, placed in the first
/// column not already holding an enemy. Later battles carry more charges and
/// trade the Snake out of the pool for a Skunk.
fn caves(index: u32, size: i32, enemies: &[Placement]) -> Vec<CaveTemplate> {
    if index < 5 {
        return Vec::new();
    }
    let candidates = [size / 2, 0, size - 1, 1];
    let Some(col) = candidates
        .into_iter()
        .find(|&c| !enemies.iter().any(|p| p.pos == GridPos::new(0, c)))
    else {
        return Vec::new();
    };

    let rare = if index >= 7 {
        UnitKind::Skunk
    } else {
        UnitKind::Snake
    };
    vec![CaveTemplate {
        pos: GridPos::new(0, col),
        spawn_interval: 2,
        spawn_charges: if index >= 8 { 4 } else { 3 },
        max_alive: 2,
        pool: vec![
            SpawnWeight {
                kind: UnitKind::Bat,
                weight: 4,
            },
            SpawnWeight {
                kind: UnitKind::Coyote,
                weight: 3,
            },
            SpawnWeight {
                kind: UnitKind::Spider,
                weight: 2,
            },
            SpawnWeight {
                kind: rare,
                weight: 1,
            },
        ],
    }]
}
