//! Enemy behavior and special-ability tables.

use tactics_core::{AttackMode, EnemyBehavior, EnemySpecial, MoveMode, SpecialEffect, UnitKind};

/// Attack shape and movement per wildlife kind.
///
/// Kinds without an entry (chess pieces, structures) fall back to the plain
/// adjacent-melee single-step default.
pub fn behavior(kind: UnitKind) -> EnemyBehavior {
    let base = EnemyBehavior::default();
    match kind {
        UnitKind::Bat => EnemyBehavior {
            attack_mode: AttackMode::LinearProjectile,
            attack_range: 2,
            move_mode: MoveMode::Fly,
            move_range: 2,
        },
        UnitKind::Snake => EnemyBehavior {
            attack_mode: AttackMode::LinearProjectile,
            attack_range: 2,
            ..base
        },
        UnitKind::Toad => EnemyBehavior {
            attack_mode: AttackMode::LinearProjectile,
            attack_range: 2,
            move_mode: MoveMode::Leap,
            move_range: 3,
        },
        UnitKind::Coyote | UnitKind::WolfAlpha | UnitKind::WolfPup => EnemyBehavior {
            attack_mode: AttackMode::FrontCone,
            move_range: 2,
            ..base
        },
        UnitKind::Skunk => EnemyBehavior {
            attack_mode: AttackMode::FrontCluster,
            ..base
        },
        UnitKind::Spider => EnemyBehavior {
            attack_mode: AttackMode::VerticalPair,
            ..base
        },
        UnitKind::Owl => EnemyBehavior {
            attack_mode: AttackMode::RayToEdge,
            attack_range: 99,
            move_mode: MoveMode::Fly,
            move_range: 2,
        },
        UnitKind::Boar => EnemyBehavior {
            move_range: 3,
            ..base
        },
        _ => base,
    }
}

/// At most one special per kind; `None` means the kind never rolls.
///
/// Trigger chances are deliberately low (15-25%) so specials read as spikes,
/// not the baseline. The Spider's root is effectively permanent until the
/// victim's statuses tick it down from 99.
pub fn special(kind: UnitKind) -> Option<EnemySpecial> {
    let entry = |effect, chance_percent, amount, turns| EnemySpecial {
        effect,
        chance_percent,
        amount,
        turns,
    };
    match kind {
        UnitKind::Bat => Some(entry(SpecialEffect::Shriek, 15, 1, 1)),
        UnitKind::Coyote => Some(entry(SpecialEffect::PackHowl, 20, 1, 1)),
        UnitKind::Spider => Some(entry(SpecialEffect::WebTrap, 25, 1, 99)),
        UnitKind::Toad => Some(entry(SpecialEffect::SuperLeap, 20, 1, 1)),
        UnitKind::Skunk => Some(entry(SpecialEffect::StenchMissile, 15, 1, 2)),
        UnitKind::Owl => Some(entry(SpecialEffect::SleepVenom, 20, 1, 1)),
        UnitKind::Snake => Some(entry(SpecialEffect::SleepVenom, 20, 1, 1)),
        UnitKind::Boar => Some(entry(SpecialEffect::Enrage, 15, 1, 1)),
        UnitKind::Bear => Some(entry(SpecialEffect::Rend, 20, 1, 1)),
        UnitKind::WolfAlpha => Some(entry(SpecialEffect::AlphaCall, 25, 1, 1)),
        UnitKind::WolfPup => Some(entry(SpecialEffect::Lunge, 20, 1, 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chess_pieces_use_the_default_behavior() {
        assert_eq!(behavior(UnitKind::Pawn), EnemyBehavior::default());
        assert_eq!(behavior(UnitKind::Queen), EnemyBehavior::default());
        assert!(special(UnitKind::King).is_none());
    }

    #[test]
    fn fliers_fly_and_the_owl_sees_the_whole_board() {
        assert_eq!(behavior(UnitKind::Bat).move_mode, MoveMode::Fly);
        let owl = behavior(UnitKind::Owl);
        assert_eq!(owl.attack_mode, AttackMode::RayToEdge);
        assert!(owl.attack_range >= 8);
    }

    #[test]
    fn special_chances_stay_in_percent_range() {
        use strum::IntoEnumIterator;
        for kind in UnitKind::iter() {
            if let Some(s) = special(kind) {
                assert!(s.chance_percent >= 1 && s.chance_percent <= 100, "{kind}");
                assert!(s.amount >= 1, "{kind}");
            }
        }
    }
}
