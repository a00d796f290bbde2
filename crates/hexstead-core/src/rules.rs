//! Placement rules: which builds are legal on a given board.
//!
//! The rules are pure predicates over a [`BoardState`] and the board
//! [`Topology`]; they never mutate anything. A settlement spot is legal
//! when it is free and either keeps its distance from every existing
//! building or hooks into the player's own road network. A road is
//! legal on a free board edge the player's network reaches.

use crate::board::{BoardState, Building};
use crate::grid::{IntersectionId, INTERSECTION_COUNT};
use crate::player::PlayerId;
use crate::topology::{Edge, Topology};

/// Placement predicates over a fixed topology
#[derive(Debug, Clone, Copy)]
pub struct PlacementRules<'a> {
    topology: &'a Topology,
}

impl<'a> PlacementRules<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// Whether `player` may found a settlement at `intersection`: the
    /// spot must exist and be free, and then either the distance rule
    /// holds or one of the player's roads reaches the spot.
    pub fn can_place_settlement(
        &self,
        board: &BoardState,
        intersection: IntersectionId,
        player: PlayerId,
    ) -> bool {
        if !self.topology.contains(intersection) {
            return false;
        }
        if board.building_at(intersection).is_some() {
            return false;
        }
        self.satisfies_distance_rule(board, intersection)
            || self.is_connected_to_road(board, intersection, player)
    }

    /// Check that no neighboring intersection holds a building, whoever
    /// owns it.
    pub fn satisfies_distance_rule(
        &self,
        board: &BoardState,
        intersection: IntersectionId,
    ) -> bool {
        self.topology
            .neighbors_of(intersection)
            .iter()
            .all(|&neighbor| board.building_at(neighbor).is_none())
    }

    /// Check if a player's road network reaches an intersection.
    fn is_connected_to_road(
        &self,
        board: &BoardState,
        intersection: IntersectionId,
        player: PlayerId,
    ) -> bool {
        board
            .roads_of(player)
            .any(|road| road.touches(intersection))
    }

    /// Whether `player` may upgrade at `intersection`: only their own
    /// settlement qualifies.
    pub fn can_upgrade_to_city(
        &self,
        board: &BoardState,
        intersection: IntersectionId,
        player: PlayerId,
    ) -> bool {
        matches!(
            board.building_at(intersection),
            Some(Building::Settlement(p)) if p == player
        )
    }

    /// Whether `player` may build a road between `a` and `b`. The pair
    /// must be an actual board edge and the edge must be free; then the
    /// player needs a connection: an own building on either endpoint,
    /// or an own road meeting the edge at an endpoint that no opponent
    /// building occupies. An opponent's building blocks only the roads
    /// arriving through it, not an endpoint the player holds directly.
    pub fn can_place_road(
        &self,
        board: &BoardState,
        a: IntersectionId,
        b: IntersectionId,
        player: PlayerId,
    ) -> bool {
        let edge = match self.topology.edge_between(a, b) {
            Some(edge) => edge,
            None => return false,
        };
        if board.road_at(&edge).is_some() {
            return false;
        }

        for endpoint in edge.endpoints() {
            if board.building_at(endpoint).map(|b| b.owner()) == Some(player) {
                return true;
            }
        }

        for road in board.roads_of(player) {
            if let Some(junction) = edge.shared_endpoint(&road) {
                match board.building_at(junction) {
                    None => return true,
                    Some(b) if b.owner() == player => return true,
                    Some(_) => continue,
                }
            }
        }
        false
    }

    /// Intersections where `player` may found a settlement, ascending.
    pub fn valid_settlement_spots(
        &self,
        board: &BoardState,
        player: PlayerId,
    ) -> Vec<IntersectionId> {
        (0..INTERSECTION_COUNT as IntersectionId)
            .filter(|&i| self.can_place_settlement(board, i, player))
            .collect()
    }

    /// Intersections holding a settlement `player` may upgrade,
    /// ascending.
    pub fn valid_city_spots(&self, board: &BoardState, player: PlayerId) -> Vec<IntersectionId> {
        board
            .buildings()
            .filter(|&(_, building)| building == Building::Settlement(player))
            .map(|(intersection, _)| intersection)
            .collect()
    }

    /// Edges where `player` may build a road, ascending.
    pub fn valid_road_spots(&self, board: &BoardState, player: PlayerId) -> Vec<Edge> {
        self.topology
            .edges()
            .into_iter()
            .filter(|edge| {
                let [a, b] = edge.endpoints();
                self.can_place_road(board, a, b, player)
            })
            .collect()
    }
}
