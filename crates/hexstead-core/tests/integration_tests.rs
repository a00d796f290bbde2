//! Integration tests for the Hexstead game engine.
//!
//! These tests verify complete flows across the grid, rules, game,
//! production, and policy modules rather than any single piece in
//! isolation.

use hexstead_core::*;

/// Check that the board and the player piece lists tell the same story.
fn assert_state_consistent(game: &Game<'_>) {
    for player in &game.players {
        assert_eq!(
            game.victory_points(player.id),
            player.settlements.len() as u32 + 2 * player.cities.len() as u32,
            "Victory points must follow from the piece lists"
        );
        for &spot in &player.settlements {
            assert_eq!(
                game.board.building_at(spot),
                Some(Building::Settlement(player.id))
            );
        }
        for &spot in &player.cities {
            assert_eq!(game.board.building_at(spot), Some(Building::City(player.id)));
        }
        for edge in &player.roads {
            assert_eq!(game.board.road_at(edge), Some(player.id));
        }
    }

    let pieces: usize = game
        .players
        .iter()
        .map(|p| p.settlements.len() + p.cities.len())
        .sum();
    assert_eq!(game.board.buildings().count(), pieces);

    let roads: usize = game.players.iter().map(|p| p.roads.len()).sum();
    assert_eq!(game.board.roads().count(), roads);
}

#[test]
fn test_build_walkthrough() {
    let grid = HexGrid::standard();
    let topology = Topology::new(&grid);
    let mut game = Game::new(&grid, &topology, vec!["Alice".into(), "Bob".into()]);

    game.place_starting_settlement(0, 0).unwrap();
    game.players[0].resources = ResourceLedger::with_amounts(10, 10, 10, 10, 10);

    // Next to the existing settlement and not yet reached by road.
    assert_eq!(
        game.apply(0, Action::BuildSettlement(1)),
        Err(ActionError::IllegalPlacement)
    );

    // A road from the settlement opens that spot up.
    game.apply(0, Action::BuildRoad(Edge::new(0, 1))).unwrap();
    game.apply(0, Action::BuildSettlement(1)).unwrap();

    game.apply(0, Action::UpgradeToCity(0)).unwrap();

    assert_eq!(game.victory_points(0), 3);
    assert_eq!(game.board.building_at(0), Some(Building::City(0)));
    assert_eq!(game.board.building_at(1), Some(Building::Settlement(0)));
    assert_eq!(game.board.road_at(&Edge::new(0, 1)), Some(0));
    assert_state_consistent(&game);
}

#[test]
fn test_production_reaches_the_right_players() {
    let grid = HexGrid::standard();
    let topology = Topology::new(&grid);
    let mut game = Game::new(&grid, &topology, vec!["Alice".into(), "Bob".into()]);

    // 36 touches a single wheat tile; 0 sits on brick, desert, and wheat.
    game.place_starting_settlement(0, 36).unwrap();
    game.place_starting_settlement(1, 0).unwrap();

    let payout = game.apply_production(6);
    assert!(!payout.is_empty(), "The wheat tile on 6 should pay out");
    assert_eq!(game.players[0].resources.wheat, 1);

    game.apply_production(5);
    assert_eq!(game.players[1].resources.brick, 1);

    game.apply_production(8);
    assert_eq!(game.players[1].resources.wheat, 1);

    // Nothing is settled around the 2 tile, and sevens never pay.
    assert!(game.apply_production(2).is_empty());
    assert!(game.apply_production(7).is_empty());
}

#[test]
fn test_random_games_stay_consistent() {
    // Run several seeded games to verify the engine never drifts out
    // of a consistent state, whatever the policies throw at it.
    for seed in 0..5u64 {
        let grid = HexGrid::standard();
        let topology = Topology::new(&grid);
        let names = (1..=3).map(|i| format!("Player {}", i)).collect();
        let mut game = Game::new(&grid, &topology, names);

        let mut dice = Dice::with_seed(seed);
        let mut policies: Vec<RandomPolicy> = (0..3)
            .map(|i| RandomPolicy::with_seed(i, seed * 10 + i as u64))
            .collect();

        for policy in &mut policies {
            let spot = policy
                .choose_starting_spot(&game)
                .expect("a fresh board always has room");
            game.place_starting_settlement(policy.player_id, spot)
                .unwrap();
        }

        let mut rounds = 0;
        while game.winner().is_none() && rounds < 500 {
            for policy in &mut policies {
                let roll = dice.roll();
                game.apply_production(roll);

                if let Some(action) = policy.choose_action(&game) {
                    // Random candidates are often illegal; that's fine.
                    let _ = game.apply(policy.player_id, action);
                }
                if game.winner().is_some() {
                    break;
                }
            }
            rounds += 1;
        }

        assert!(rounds > 0, "Game {} should have run some rounds", seed);
        assert_state_consistent(&game);

        if let Some(winner) = game.winner() {
            assert!(
                game.victory_points(winner) >= VICTORY_POINTS_TO_WIN,
                "The winner must actually be at the target"
            );
        }
    }
}

#[test]
fn test_shuffled_boards_play_like_standard_ones() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(99);
    let grid = HexGrid::shuffled_with_rng(&mut rng);
    let topology = Topology::new(&grid);
    let mut game = Game::new(&grid, &topology, vec!["Alice".into(), "Bob".into()]);

    // The corner table never moves, so placement behaves the same.
    game.place_starting_settlement(0, 0).unwrap();
    assert_eq!(
        game.place_starting_settlement(1, 1),
        Err(ActionError::IllegalPlacement)
    );
    game.place_starting_settlement(1, 2).unwrap();

    // Every producing tile still pays its corners.
    for roll in 2..=12u8 {
        if roll == 7 {
            assert!(game.apply_production(roll).is_empty());
        } else {
            game.apply_production(roll);
        }
    }
    assert_state_consistent(&game);
}
