//! Game orchestration: composite build actions over board, rules, and
//! players.
//!
//! [`Game`] borrows the immutable world (grid and topology) and owns
//! the mutable state (board occupancy and player ledgers). Every
//! action checks the placement rules, then affordability, and only
//! then mutates; a rejected action leaves the whole game untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BoardError, BoardState};
use crate::grid::{HexGrid, IntersectionId};
use crate::player::{costs, Player, PlayerId};
use crate::production::{Distribution, ProductionEngine};
use crate::rules::PlacementRules;
use crate::topology::{Edge, Topology};

/// Victory points needed to win
pub const VICTORY_POINTS_TO_WIN: u32 = 10;

/// A build action a player can take on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Found a settlement at an intersection
    BuildSettlement(IntersectionId),
    /// Upgrade an existing settlement of one's own to a city
    UpgradeToCity(IntersectionId),
    /// Build a road on the edge between two intersections
    BuildRoad(Edge),
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("player {0} is not in this game")]
    UnknownPlayer(PlayerId),

    #[error("placement is not legal there")]
    IllegalPlacement,

    #[error("cannot afford this")]
    CannotAfford,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game<'a> {
    grid: &'a HexGrid,
    topology: &'a Topology,
    /// Buildings and roads placed so far
    pub board: BoardState,
    /// All players, indexed by id
    pub players: Vec<Player>,
}

impl<'a> Game<'a> {
    /// Create a new game on the given board. The topology must be the
    /// one derived from `grid`.
    pub fn new(grid: &'a HexGrid, topology: &'a Topology, player_names: Vec<String>) -> Self {
        assert!(
            (2..=4).contains(&player_names.len()),
            "Must have 2-4 players"
        );

        let players: Vec<Player> = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        Self {
            grid,
            topology,
            board: BoardState::new(),
            players,
        }
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn grid(&self) -> &'a HexGrid {
        self.grid
    }

    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Placement predicates bound to this game's topology
    pub fn rules(&self) -> PlacementRules<'a> {
        PlacementRules::new(self.topology)
    }

    // ==================== Actions ====================

    /// Apply a build action for a player.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<(), ActionError> {
        match action {
            Action::BuildSettlement(intersection) => self.build_settlement(player, intersection),
            Action::UpgradeToCity(intersection) => self.upgrade_to_city(player, intersection),
            Action::BuildRoad(edge) => self.build_road(player, edge),
        }
    }

    /// Found a settlement without paying its cost, as during the
    /// starting placement. The placement rules still apply.
    pub fn place_starting_settlement(
        &mut self,
        player: PlayerId,
        intersection: IntersectionId,
    ) -> Result<(), ActionError> {
        self.ensure_player(player)?;
        if !self
            .rules()
            .can_place_settlement(&self.board, intersection, player)
        {
            return Err(ActionError::IllegalPlacement);
        }
        self.board.place_settlement(intersection, player)?;
        self.players[player as usize].settlements.push(intersection);
        Ok(())
    }

    fn build_settlement(
        &mut self,
        player: PlayerId,
        intersection: IntersectionId,
    ) -> Result<(), ActionError> {
        self.ensure_player(player)?;
        if !self
            .rules()
            .can_place_settlement(&self.board, intersection, player)
        {
            return Err(ActionError::IllegalPlacement);
        }
        if !self.players[player as usize].can_afford_settlement() {
            return Err(ActionError::CannotAfford);
        }
        self.board.place_settlement(intersection, player)?;

        let p = &mut self.players[player as usize];
        p.resources.subtract(&costs::settlement());
        p.settlements.push(intersection);
        Ok(())
    }

    fn upgrade_to_city(
        &mut self,
        player: PlayerId,
        intersection: IntersectionId,
    ) -> Result<(), ActionError> {
        self.ensure_player(player)?;
        if !self
            .rules()
            .can_upgrade_to_city(&self.board, intersection, player)
        {
            return Err(ActionError::IllegalPlacement);
        }
        if !self.players[player as usize].can_afford_city() {
            return Err(ActionError::CannotAfford);
        }
        self.board.upgrade_to_city(intersection, player)?;

        let p = &mut self.players[player as usize];
        p.resources.subtract(&costs::city());
        if let Some(pos) = p.settlements.iter().position(|&i| i == intersection) {
            p.settlements.remove(pos);
        }
        p.cities.push(intersection);
        Ok(())
    }

    fn build_road(&mut self, player: PlayerId, edge: Edge) -> Result<(), ActionError> {
        self.ensure_player(player)?;
        let [a, b] = edge.endpoints();
        if !self.rules().can_place_road(&self.board, a, b, player) {
            return Err(ActionError::IllegalPlacement);
        }
        if !self.players[player as usize].can_afford_road() {
            return Err(ActionError::CannotAfford);
        }
        self.board.place_road(edge, player)?;

        let p = &mut self.players[player as usize];
        p.resources.subtract(&costs::road());
        p.roads.push(edge);
        Ok(())
    }

    // ==================== Production ====================

    /// Roll production: work out what `roll` yields on the current
    /// board and pay it into the owners' ledgers. Returns the
    /// distribution for reporting.
    pub fn apply_production(&mut self, roll: u8) -> Distribution {
        let engine = ProductionEngine::new(self.grid);
        let distribution = engine.distribute(&self.board, roll);
        for credit in distribution.credits() {
            if let Some(player) = self.players.get_mut(credit.owner as usize) {
                player.resources.add(credit.resource, credit.amount);
            }
        }
        distribution
    }

    // ==================== Victory ====================

    /// Victory points of a player (0 for unknown ids)
    pub fn victory_points(&self, player: PlayerId) -> u32 {
        self.get_player(player)
            .map(|p| p.victory_points())
            .unwrap_or(0)
    }

    /// The first player (by id) at or above the victory target, if any
    pub fn winner(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.victory_points() >= VICTORY_POINTS_TO_WIN)
            .map(|p| p.id)
    }

    fn ensure_player(&self, id: PlayerId) -> Result<(), ActionError> {
        if (id as usize) < self.players.len() {
            Ok(())
        } else {
            Err(ActionError::UnknownPlayer(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Building;
    use crate::grid::Resource;
    use pretty_assertions::assert_eq;

    fn two_names() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_starting_settlement_is_free_but_rule_checked() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());

        game.place_starting_settlement(0, 10).unwrap();
        assert_eq!(game.board.building_at(10), Some(Building::Settlement(0)));
        assert_eq!(game.players[0].settlements, vec![10]);
        assert_eq!(game.players[0].hand_size(), 0);

        // Intersection 11 neighbors 10, so the distance rule bites.
        assert_eq!(
            game.place_starting_settlement(1, 11),
            Err(ActionError::IllegalPlacement)
        );
        assert!(game.players[1].settlements.is_empty());
    }

    #[test]
    fn test_unknown_player_is_rejected() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());

        assert_eq!(
            game.apply(7, Action::BuildSettlement(0)),
            Err(ActionError::UnknownPlayer(7))
        );
        assert_eq!(game.victory_points(7), 0);
    }

    #[test]
    fn test_builds_require_resources() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        game.place_starting_settlement(0, 10).unwrap();

        assert_eq!(
            game.apply(0, Action::BuildRoad(Edge::new(10, 11))),
            Err(ActionError::CannotAfford)
        );
        assert_eq!(
            game.apply(0, Action::UpgradeToCity(10)),
            Err(ActionError::CannotAfford)
        );
        assert_eq!(
            game.apply(0, Action::BuildSettlement(30)),
            Err(ActionError::CannotAfford)
        );
    }

    #[test]
    fn test_build_settlement_spends_and_records() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        game.players[0].resources = costs::settlement();

        game.apply(0, Action::BuildSettlement(30)).unwrap();
        assert_eq!(game.board.building_at(30), Some(Building::Settlement(0)));
        assert_eq!(game.players[0].settlements, vec![30]);
        assert!(game.players[0].resources.is_empty());
        assert_eq!(game.victory_points(0), 1);
    }

    #[test]
    fn test_upgrade_moves_piece_and_doubles_points() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        game.place_starting_settlement(0, 36).unwrap();
        game.players[0].resources = costs::city();

        game.apply(0, Action::UpgradeToCity(36)).unwrap();
        assert_eq!(game.board.building_at(36), Some(Building::City(0)));
        assert!(game.players[0].settlements.is_empty());
        assert_eq!(game.players[0].cities, vec![36]);
        assert!(game.players[0].resources.is_empty());
        assert_eq!(game.victory_points(0), 2);
    }

    #[test]
    fn test_build_road_needs_a_connection() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        game.place_starting_settlement(0, 0).unwrap();
        game.players[0].resources = costs::road();

        // Detached edge, even though the player can pay.
        assert_eq!(
            game.apply(0, Action::BuildRoad(Edge::new(30, 31))),
            Err(ActionError::IllegalPlacement)
        );

        game.apply(0, Action::BuildRoad(Edge::new(0, 1))).unwrap();
        assert_eq!(game.board.road_at(&Edge::new(0, 1)), Some(0));
        assert_eq!(game.players[0].roads, vec![Edge::new(0, 1)]);
        assert!(game.players[0].resources.is_empty());
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        game.place_starting_settlement(1, 30).unwrap();
        game.players[0].resources = costs::settlement();

        // Occupied spot: the rule verdict fails before any spending.
        assert_eq!(
            game.apply(0, Action::BuildSettlement(30)),
            Err(ActionError::IllegalPlacement)
        );
        assert_eq!(game.players[0].resources, costs::settlement());
        assert_eq!(game.board.building_at(30), Some(Building::Settlement(1)));
        assert!(game.players[0].settlements.is_empty());
    }

    #[test]
    fn test_apply_production_pays_owners() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        // Intersection 36 touches only hex 7 (wheat, token 6).
        game.place_starting_settlement(0, 36).unwrap();

        let dist = game.apply_production(6);
        assert_eq!(dist.credits().len(), 1);
        assert_eq!(game.players[0].resources.get(Resource::Wheat), 1);
        assert_eq!(game.players[1].hand_size(), 0);

        // A 7 matches no token.
        let dist = game.apply_production(7);
        assert!(dist.is_empty());
        assert_eq!(game.players[0].hand_size(), 1);
    }

    #[test]
    fn test_winner_is_first_at_target() {
        let grid = HexGrid::standard();
        let topo = Topology::new(&grid);
        let mut game = Game::new(&grid, &topo, two_names());
        assert_eq!(game.winner(), None);

        game.players[1].cities = vec![0, 2, 9, 11, 29];
        assert_eq!(game.victory_points(1), 10);
        assert_eq!(game.winner(), Some(1));

        // Once both pass the mark, the lower id takes precedence.
        game.players[0].cities = vec![40, 42, 44, 47, 50];
        assert_eq!(game.winner(), Some(0));
    }
}
