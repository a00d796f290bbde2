//! Random action policy for simulated players.
//!
//! The policy proposes one build candidate per turn: a uniformly
//! random kind (settlement, city upgrade, road) aimed at a random
//! location. Candidates are not pre-validated; the game rejects
//! illegal ones and the caller simply moves on. The one exception is
//! an oversized hand, which forces a deterministic spend-down so
//! resources cannot pile up forever.

use rand::prelude::*;

use crate::game::{Action, Game};
use crate::grid::{IntersectionId, INTERSECTION_COUNT};
use crate::player::PlayerId;

/// Hand size above which a player must spend before anything else
pub const FORCED_SPEND_HAND: u32 = 7;

/// A player agent picking random build candidates
pub struct RandomPolicy {
    pub player_id: PlayerId,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        Self {
            player_id,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a random legal spot for the free starting settlement.
    pub fn choose_starting_spot(&mut self, game: &Game<'_>) -> Option<IntersectionId> {
        let spots = game
            .rules()
            .valid_settlement_spots(&game.board, self.player_id);
        spots.choose(&mut self.rng).copied()
    }

    /// Pick this turn's build candidate, or None when an oversized
    /// hand cannot be spent down.
    pub fn choose_action(&mut self, game: &Game<'_>) -> Option<Action> {
        let player = game.get_player(self.player_id)?;

        if player.hand_size() > FORCED_SPEND_HAND {
            return self.forced_spend(game);
        }

        match self.rng.gen_range(0..3) {
            0 => {
                let spot = self.rng.gen_range(0..INTERSECTION_COUNT as IntersectionId);
                Some(Action::BuildSettlement(spot))
            }
            1 => player
                .settlements
                .choose(&mut self.rng)
                .map(|&i| Action::UpgradeToCity(i)),
            _ => {
                let edges = game.topology().edges();
                edges.choose(&mut self.rng).map(|&e| Action::BuildRoad(e))
            }
        }
    }

    /// Deterministic spend-down for an oversized hand: the first
    /// affordable legal settlement by ascending intersection id, then
    /// the first upgradeable settlement, then the first reachable
    /// edge. None when nothing can be bought.
    fn forced_spend(&mut self, game: &Game<'_>) -> Option<Action> {
        let rules = game.rules();
        let player = game.get_player(self.player_id)?;

        if player.can_afford_settlement() {
            if let Some(&spot) = rules
                .valid_settlement_spots(&game.board, self.player_id)
                .first()
            {
                return Some(Action::BuildSettlement(spot));
            }
        }
        if player.can_afford_city() {
            if let Some(&spot) = rules.valid_city_spots(&game.board, self.player_id).first() {
                return Some(Action::UpgradeToCity(spot));
            }
        }
        if player.can_afford_road() {
            if let Some(&edge) = rules.valid_road_spots(&game.board, self.player_id).first() {
                return Some(Action::BuildRoad(edge));
            }
        }
        None
    }
}
