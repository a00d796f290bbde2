//! In-memory game runner.
//!
//! One call to [`run_game`] plays a single game from board setup to
//! victory or the round cap, entirely inside this process. Every
//! random stream (board shuffle, dice, policies) is derived from the
//! per-game seed, so a summary can be reproduced from its seed alone.

use hexstead_core::{Dice, Game, HexGrid, PlayerId, RandomPolicy, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// Settings shared by every game in a run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub players: u8,
    pub max_rounds: u32,
    pub seed: u64,
    pub shuffle_board: bool,
}

/// The outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game: u32,
    pub seed: u64,
    pub winner: Option<PlayerId>,
    pub rounds: u32,
    pub victory_points: Vec<u32>,
}

/// Play one game to completion or to the round cap.
pub fn run_game(index: u32, config: &SimConfig) -> GameSummary {
    let seed = config.seed.wrapping_add(index as u64);
    let mut root = StdRng::seed_from_u64(seed);

    let grid = if config.shuffle_board {
        HexGrid::shuffled_with_rng(&mut root)
    } else {
        HexGrid::standard()
    };
    let topology = Topology::new(&grid);

    let names = (1..=config.players)
        .map(|i| format!("Player {}", i))
        .collect();
    let mut game = Game::new(&grid, &topology, names);

    let mut dice = Dice::with_seed(root.gen());
    let mut policies: Vec<RandomPolicy> = (0..config.players)
        .map(|id| RandomPolicy::with_seed(id, root.gen()))
        .collect();

    // One free settlement each before the dice start.
    for policy in &mut policies {
        let spot = policy
            .choose_starting_spot(&game)
            .expect("a fresh board has open spots for every starting player");
        game.place_starting_settlement(policy.player_id, spot)
            .expect("the chosen starting spot was validated");
    }

    // A turn is one player's roll: production pays every player with a
    // building on a hit tile, then the roller takes one action.
    let mut rounds = 0;
    'rounds: while rounds < config.max_rounds {
        rounds += 1;

        for policy in &mut policies {
            let roll = dice.roll();
            let payout = game.apply_production(roll);
            debug!(
                "Game {} round {} player {}: rolled {}, {} payout(s)",
                index,
                rounds,
                policy.player_id,
                roll,
                payout.credits().len()
            );

            if let Some(action) = policy.choose_action(&game) {
                match game.apply(policy.player_id, action) {
                    Ok(()) => {
                        debug!("Game {} player {}: {:?}", index, policy.player_id, action)
                    }
                    // Random candidates are often illegal; just move on.
                    Err(e) => debug!(
                        "Game {} player {}: {:?} rejected: {}",
                        index, policy.player_id, action, e
                    ),
                }
            }
            if game.winner().is_some() {
                break 'rounds;
            }
        }
    }

    let winner = game.winner();
    let victory_points = (0..config.players)
        .map(|id| game.victory_points(id))
        .collect();

    match winner {
        Some(w) => info!(
            "Game {} (seed {}): player {} wins after {} rounds",
            index, seed, w, rounds
        ),
        None => info!(
            "Game {} (seed {}): no winner within {} rounds",
            index, seed, rounds
        ),
    }

    GameSummary {
        game: index,
        seed,
        winner,
        rounds,
        victory_points,
    }
}
