//! Stat lines for every unit kind.

use tactics_core::{UnitKind, UnitProfile};

/// Baseline max hp and attack per kind.
///
/// Chess pieces trade hp for attack as they get more expensive to summon;
/// wildlife scales from 1/1 chaff up to the Bear; structures hit back for
/// nothing and exist to be chewed through.
pub fn profile(kind: UnitKind) -> UnitProfile {
    let (max_hp, attack) = match kind {
        UnitKind::King => (5, 2),
        UnitKind::Pawn => (1, 1),
        UnitKind::Knight => (3, 2),
        UnitKind::Bishop => (2, 2),
        UnitKind::Rook => (2, 3),
        UnitKind::Queen => (3, 4),
        UnitKind::Bat => (1, 1),
        UnitKind::Coyote => (2, 1),
        UnitKind::Owl => (2, 1),
        UnitKind::Boar => (3, 2),
        UnitKind::Snake => (1, 1),
        UnitKind::Spider => (2, 1),
        UnitKind::Skunk => (3, 1),
        UnitKind::WolfAlpha => (6, 2),
        UnitKind::WolfPup => (2, 1),
        UnitKind::Bear => (10, 3),
        UnitKind::Toad => (3, 2),
        UnitKind::Rock | UnitKind::Cave => (12, 0),
    };
    UnitProfile { max_hp, attack }
}
