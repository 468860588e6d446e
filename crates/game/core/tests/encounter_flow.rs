//! Full player-facing encounter flows driven through the controller.

mod common;

use common::{TestContent, battle, card, controller};
use tactics_core::{
    CardKind, CommandError, EncounterEvent, GridPos, NodeType, RunNode, UnitKind,
};

#[test]
fn lethal_attack_wins_and_resolves_once() {
    // King at (3,2), a 1 hp Bat one cell up.
    let content = TestContent::on_board(4).with_enemy(UnitKind::Bat, 2, 2);
    let mut game = controller(content, 7);
    game.start_node(battle("E01"));

    game.select_at(GridPos::new(3, 2)).unwrap();
    assert!(game.attack_highlights().contains(&GridPos::new(2, 2)));
    game.select_at(GridPos::new(2, 2)).unwrap();

    assert!(game.is_resolved());
    let events = game.drain_events();
    let resolutions: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            EncounterEvent::EncounterResolved { won, node_id } => Some((*won, node_id.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(resolutions, vec![(true, "E01".to_owned())]);
    assert_eq!(game.session().last_completed_node.as_deref(), Some("E01"));

    // The resolved encounter rejects further commands.
    assert!(matches!(
        game.end_player_turn(),
        Err(CommandError::EncounterResolved)
    ));
}

#[test]
fn shield_absorbs_one_point_per_hit() {
    let content = TestContent::on_board(4)
        .with_enemy(UnitKind::WolfAlpha, 2, 2)
        .with_profile(UnitKind::WolfAlpha, 6, 2)
        .with_card(card("shield", CardKind::Shield, None));
    let mut game = controller(content, 11);
    game.start_node(battle("E02"));

    game.try_play_card(0).unwrap();
    game.select_at(GridPos::new(3, 2)).unwrap();
    let king = game.board().find_king().expect("king on board");
    assert_eq!(king.status.shield_charge, 1);
    assert_eq!(king.hp, 5);

    game.end_player_turn().unwrap();

    // 2 incoming, shield eats 1, king drops 5 -> 4 and the charge is gone.
    let king = game.board().find_king().expect("king survives");
    assert_eq!(king.hp, 4);
    assert_eq!(king.status.shield_charge, 0);
}

#[test]
fn pawn_promotion_switches_move_set() {
    let content = TestContent::on_board(4)
        .with_player(UnitKind::Pawn, 1, 0)
        .with_enemy(UnitKind::Bear, 0, 3)
        .with_profile(UnitKind::Bear, 10, 1);
    let mut game = controller(content, 3);
    game.start_node(battle("E03"));

    game.select_at(GridPos::new(1, 0)).unwrap();
    assert_eq!(
        game.move_highlights().iter().copied().collect::<Vec<_>>(),
        vec![GridPos::new(0, 0)]
    );
    game.select_at(GridPos::new(0, 0)).unwrap();
    let events = game.drain_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, EncounterEvent::UnitPromoted { .. }))
    );

    game.end_player_turn().unwrap();

    // Promoted pawn roams all eight neighbors instead of one forward cell.
    game.select_at(GridPos::new(0, 0)).unwrap();
    assert!(game.move_highlights().contains(&GridPos::new(0, 1)));
    assert!(game.move_highlights().contains(&GridPos::new(1, 1)));
}

#[test]
fn attacking_an_empty_pattern_cell_only_warns() {
    let content = TestContent::on_board(4)
        .with_enemy(UnitKind::Bear, 0, 0)
        .with_profile(UnitKind::Bear, 10, 1);
    let mut game = controller(content, 21);
    game.start_node(battle("E03"));

    // Move first so only the attack pattern stays highlighted.
    game.select_at(GridPos::new(3, 2)).unwrap();
    game.select_at(GridPos::new(2, 2)).unwrap();
    assert!(game.move_highlights().is_empty());
    assert!(game.attack_highlights().contains(&GridPos::new(1, 2)));

    game.drain_events();
    game.select_at(GridPos::new(1, 2)).unwrap();

    let events = game.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        EncounterEvent::Message { text } if text == "Select an enemy to attack."
    )));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, EncounterEvent::AttackStarted { .. })),
        "empty cell must not resolve an attack"
    );
    let king = game.board().find_king().expect("king untouched");
    assert_eq!(king.pos, GridPos::new(2, 2));
    assert!(king.can_attack(), "the warning must not spend the attack");
}

#[test]
fn planned_destinations_are_unique() {
    let content = TestContent::on_board(4)
        .with_enemy(UnitKind::Coyote, 1, 1)
        .with_enemy(UnitKind::Coyote, 1, 3)
        .with_profile(UnitKind::Coyote, 2, 1);
    let mut game = controller(content, 5);
    game.start_node(battle("E04"));

    let plan = game.plan().expect("plan built at encounter start");
    let dests: Vec<GridPos> = plan
        .intents
        .iter()
        .filter(|i| i.repositions())
        .map(|i| i.to)
        .collect();
    let mut unique = dests.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), dests.len(), "two intents share a destination");
    for dest in &dests {
        assert!(plan.reserved.contains(dest));
    }
}

#[test]
fn non_battle_nodes_resolve_immediately() {
    let mut game = controller(TestContent::on_board(4), 1);
    game.start_node(RunNode {
        id: "rest_1".to_owned(),
        node_type: NodeType::Rest,
    });

    assert!(game.is_resolved());
    assert_eq!(game.session().last_completed_node.as_deref(), Some("rest_1"));
    let events = game.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        EncounterEvent::EncounterResolved { won: true, node_id } if node_id == "rest_1"
    )));
    assert!(matches!(
        game.select_at(GridPos::new(0, 0)),
        Err(CommandError::EncounterResolved)
    ));
}

#[test]
fn energy_regenerates_up_to_the_cap() {
    let content = TestContent::on_board(4)
        .with_enemy(UnitKind::Bear, 0, 0)
        .with_profile(UnitKind::Bear, 10, 1);
    let mut game = controller(content, 9);
    game.start_node(battle("E05"));

    assert_eq!(game.turn().energy, 3);
    game.end_player_turn().unwrap();
    assert_eq!(game.turn().round, 2);
    assert_eq!(game.turn().energy, 5, "3 + 3 regen clamps to max 5");
    game.end_player_turn().unwrap();
    assert_eq!(game.turn().energy, 5);
}

#[test]
fn same_seed_replays_identically() {
    let build = || {
        let content = TestContent::on_board(4)
            .with_enemy(UnitKind::Coyote, 1, 1)
            .with_enemy(UnitKind::Bat, 0, 2)
            .with_profile(UnitKind::Coyote, 2, 1)
            .with_card(card("summon_pawn", CardKind::Summon, Some(UnitKind::Pawn)))
            .with_card(card("heal", CardKind::Heal, None));
        let mut game = controller(content, 42);
        game.start_node(battle("E06"));
        for _ in 0..3 {
            if game.is_resolved() {
                break;
            }
            game.end_player_turn().unwrap();
        }
        game
    };

    let mut a = build();
    let mut b = build();
    assert_eq!(
        format!("{:?}", a.drain_events()),
        format!("{:?}", b.drain_events())
    );
    let units_a: Vec<_> = a.board().units().cloned().collect();
    let units_b: Vec<_> = b.board().units().cloned().collect();
    assert_eq!(units_a, units_b);
}
