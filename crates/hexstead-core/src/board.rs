//! Mutable board state: who built what, where.
//!
//! [`BoardState`] is pure occupancy bookkeeping. It checks that ids
//! name real intersections and that spots are free, but it does not
//! know the adjacency relation; placement legality beyond occupancy
//! (distance rule, road connectivity) lives in the rules layer. Every
//! mutator either applies fully or returns an error and leaves the
//! state untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{IntersectionId, INTERSECTION_COUNT};
use crate::player::PlayerId;
use crate::topology::Edge;

// ==================== Buildings ====================

/// A building occupying an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    /// Settlement (1 VP, 1 resource per production hit)
    Settlement(PlayerId),
    /// City (2 VP, 2 resources per production hit)
    City(PlayerId),
}

impl Building {
    /// Who owns this building
    pub fn owner(&self) -> PlayerId {
        match self {
            Building::Settlement(p) | Building::City(p) => *p,
        }
    }

    /// Victory points provided by this building
    pub fn victory_points(&self) -> u32 {
        match self {
            Building::Settlement(_) => 1,
            Building::City(_) => 2,
        }
    }

    /// Resource multiplier (how many resources per production hit)
    pub fn resource_multiplier(&self) -> u32 {
        match self {
            Building::Settlement(_) => 1,
            Building::City(_) => 2,
        }
    }

    pub fn is_settlement(&self) -> bool {
        matches!(self, Building::Settlement(_))
    }
}

// ==================== Errors ====================

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("intersection {0} is already occupied")]
    AlreadyOccupied(IntersectionId),

    #[error("no settlement of player {owner} at intersection {intersection} to upgrade")]
    NoUpgradeableSettlement {
        intersection: IntersectionId,
        owner: PlayerId,
    },

    #[error("edge {0} already carries a road")]
    EdgeAlreadyOccupied(Edge),

    #[error("intersection {0} does not exist on this board")]
    UnknownIntersection(IntersectionId),
}

// ==================== Board state ====================

/// Buildings and roads placed so far. Keys are kept ordered so that
/// iteration (and everything derived from it) is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardState {
    buildings: BTreeMap<IntersectionId, Building>,
    roads: BTreeMap<Edge, PlayerId>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Query Methods ====================

    /// The building at an intersection, if any. Unknown ids are simply
    /// empty.
    pub fn building_at(&self, intersection: IntersectionId) -> Option<Building> {
        self.buildings.get(&intersection).copied()
    }

    /// The owner of the road on an edge, if any.
    pub fn road_at(&self, edge: &Edge) -> Option<PlayerId> {
        self.roads.get(edge).copied()
    }

    /// All buildings, ascending by intersection id.
    pub fn buildings(&self) -> impl Iterator<Item = (IntersectionId, Building)> + '_ {
        self.buildings.iter().map(|(&i, &b)| (i, b))
    }

    /// All roads, ascending by edge.
    pub fn roads(&self) -> impl Iterator<Item = (Edge, PlayerId)> + '_ {
        self.roads.iter().map(|(&e, &p)| (e, p))
    }

    /// The given player's roads, ascending by edge.
    pub fn roads_of(&self, owner: PlayerId) -> impl Iterator<Item = Edge> + '_ {
        self.roads
            .iter()
            .filter(move |(_, &p)| p == owner)
            .map(|(&e, _)| e)
    }

    // ==================== Mutation Methods ====================

    /// Place a settlement on a free intersection.
    pub fn place_settlement(
        &mut self,
        intersection: IntersectionId,
        owner: PlayerId,
    ) -> Result<(), BoardError> {
        self.ensure_known(intersection)?;
        if self.buildings.contains_key(&intersection) {
            return Err(BoardError::AlreadyOccupied(intersection));
        }
        self.buildings
            .insert(intersection, Building::Settlement(owner));
        Ok(())
    }

    /// Replace the owner's settlement at `intersection` with a city.
    /// Fails if the spot is empty, holds another player's building, or
    /// already holds a city.
    pub fn upgrade_to_city(
        &mut self,
        intersection: IntersectionId,
        owner: PlayerId,
    ) -> Result<(), BoardError> {
        self.ensure_known(intersection)?;
        match self.buildings.get(&intersection) {
            Some(Building::Settlement(p)) if *p == owner => {
                self.buildings.insert(intersection, Building::City(owner));
                Ok(())
            }
            _ => Err(BoardError::NoUpgradeableSettlement {
                intersection,
                owner,
            }),
        }
    }

    /// Claim a free edge for the owner's road. Both endpoints must be
    /// real intersections; whether they are adjacent is not checked
    /// here.
    pub fn place_road(&mut self, edge: Edge, owner: PlayerId) -> Result<(), BoardError> {
        for endpoint in edge.endpoints() {
            self.ensure_known(endpoint)?;
        }
        if self.roads.contains_key(&edge) {
            return Err(BoardError::EdgeAlreadyOccupied(edge));
        }
        self.roads.insert(edge, owner);
        Ok(())
    }

    fn ensure_known(&self, intersection: IntersectionId) -> Result<(), BoardError> {
        if (intersection as usize) < INTERSECTION_COUNT {
            Ok(())
        } else {
            Err(BoardError::UnknownIntersection(intersection))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_building_accessors() {
        let settlement = Building::Settlement(2);
        assert_eq!(settlement.owner(), 2);
        assert_eq!(settlement.victory_points(), 1);
        assert_eq!(settlement.resource_multiplier(), 1);
        assert!(settlement.is_settlement());

        let city = Building::City(0);
        assert_eq!(city.owner(), 0);
        assert_eq!(city.victory_points(), 2);
        assert_eq!(city.resource_multiplier(), 2);
        assert!(!city.is_settlement());
    }

    #[test]
    fn test_place_settlement() {
        let mut board = BoardState::new();
        assert_eq!(board.building_at(10), None);

        board.place_settlement(10, 0).unwrap();
        assert_eq!(board.building_at(10), Some(Building::Settlement(0)));
    }

    #[test]
    fn test_place_settlement_on_occupied_spot_fails() {
        let mut board = BoardState::new();
        board.place_settlement(10, 0).unwrap();

        // Occupied is occupied, whoever asks.
        assert_eq!(
            board.place_settlement(10, 0),
            Err(BoardError::AlreadyOccupied(10))
        );
        assert_eq!(
            board.place_settlement(10, 1),
            Err(BoardError::AlreadyOccupied(10))
        );
        assert_eq!(board.building_at(10), Some(Building::Settlement(0)));
    }

    #[test]
    fn test_upgrade_to_city() {
        let mut board = BoardState::new();
        board.place_settlement(5, 1).unwrap();
        board.upgrade_to_city(5, 1).unwrap();
        assert_eq!(board.building_at(5), Some(Building::City(1)));
    }

    #[test]
    fn test_upgrade_requires_own_settlement() {
        let mut board = BoardState::new();

        // Nothing there at all.
        assert_eq!(
            board.upgrade_to_city(5, 1),
            Err(BoardError::NoUpgradeableSettlement {
                intersection: 5,
                owner: 1
            })
        );

        // Someone else's settlement.
        board.place_settlement(5, 0).unwrap();
        assert_eq!(
            board.upgrade_to_city(5, 1),
            Err(BoardError::NoUpgradeableSettlement {
                intersection: 5,
                owner: 1
            })
        );
        assert_eq!(board.building_at(5), Some(Building::Settlement(0)));

        // Already a city.
        board.upgrade_to_city(5, 0).unwrap();
        assert_eq!(
            board.upgrade_to_city(5, 0),
            Err(BoardError::NoUpgradeableSettlement {
                intersection: 5,
                owner: 0
            })
        );
        assert_eq!(board.building_at(5), Some(Building::City(0)));
    }

    #[test]
    fn test_place_road() {
        let mut board = BoardState::new();
        let edge = Edge::new(0, 1);
        assert_eq!(board.road_at(&edge), None);

        board.place_road(edge, 0).unwrap();
        assert_eq!(board.road_at(&edge), Some(0));

        assert_eq!(
            board.place_road(edge, 1),
            Err(BoardError::EdgeAlreadyOccupied(edge))
        );
        assert_eq!(board.road_at(&edge), Some(0));
    }

    #[test]
    fn test_unknown_intersections_are_rejected() {
        let mut board = BoardState::new();
        assert_eq!(
            board.place_settlement(54, 0),
            Err(BoardError::UnknownIntersection(54))
        );
        assert_eq!(
            board.upgrade_to_city(99, 0),
            Err(BoardError::UnknownIntersection(99))
        );
        assert_eq!(
            board.place_road(Edge::new(0, 54), 0),
            Err(BoardError::UnknownIntersection(54))
        );
        assert_eq!(board.buildings().count(), 0);
        assert_eq!(board.roads().count(), 0);
    }

    #[test]
    fn test_failed_mutation_leaves_state_unchanged() {
        let mut board = BoardState::new();
        board.place_settlement(10, 0).unwrap();
        board.place_road(Edge::new(0, 1), 0).unwrap();

        let _ = board.place_settlement(10, 1);
        let _ = board.upgrade_to_city(11, 1);
        let _ = board.place_road(Edge::new(0, 1), 1);

        assert_eq!(board.buildings().count(), 1);
        assert_eq!(board.building_at(10), Some(Building::Settlement(0)));
        assert_eq!(board.roads().count(), 1);
        assert_eq!(board.road_at(&Edge::new(0, 1)), Some(0));
    }

    #[test]
    fn test_roads_of_filters_by_owner() {
        let mut board = BoardState::new();
        board.place_road(Edge::new(0, 1), 0).unwrap();
        board.place_road(Edge::new(1, 2), 1).unwrap();
        board.place_road(Edge::new(0, 5), 0).unwrap();

        let mine: Vec<Edge> = board.roads_of(0).collect();
        assert_eq!(mine, vec![Edge::new(0, 1), Edge::new(0, 5)]);

        let theirs: Vec<Edge> = board.roads_of(1).collect();
        assert_eq!(theirs, vec![Edge::new(1, 2)]);

        assert_eq!(board.roads_of(3).count(), 0);
    }
}
