//! Intersection adjacency and edges.
//!
//! Adjacency is defined entirely by the hex boundary cycles: two
//! intersections are adjacent exactly when they appear next to each
//! other (cyclically) in some hex's corner row. The [`Topology`]
//! precomputes that relation once per grid; every query answers the
//! same as a direct scan of the corner table would.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{HexGrid, IntersectionId, INTERSECTION_COUNT};

/// An undirected edge between two adjacent intersections, stored in
/// canonical order (smaller endpoint first) so that equal edges compare
/// and hash equal regardless of construction order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Edge {
    a: IntersectionId,
    b: IntersectionId,
}

impl Edge {
    /// Build an edge from two endpoints in either order.
    ///
    /// This is a plain value; whether the pair is actually adjacent on
    /// the board is decided by [`Topology::is_edge`].
    pub fn new(a: IntersectionId, b: IntersectionId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Both endpoints, smaller first.
    pub fn endpoints(&self) -> [IntersectionId; 2] {
        [self.a, self.b]
    }

    /// Whether `intersection` is one of the endpoints.
    pub fn touches(&self, intersection: IntersectionId) -> bool {
        self.a == intersection || self.b == intersection
    }

    /// The intersection two edges have in common, if any.
    pub fn shared_endpoint(&self, other: &Edge) -> Option<IntersectionId> {
        if other.touches(self.a) {
            Some(self.a)
        } else if other.touches(self.b) {
            Some(self.b)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Precomputed adjacency over a grid's intersections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Sorted, deduplicated neighbor list per intersection
    neighbors: Vec<Vec<IntersectionId>>,
}

impl Topology {
    /// Derive the adjacency relation from every hex's corner cycle,
    /// including the wrap-around pair (last corner back to first).
    pub fn new(grid: &HexGrid) -> Self {
        let mut neighbors: Vec<Vec<IntersectionId>> = vec![Vec::new(); INTERSECTION_COUNT];

        for tile in grid.tiles() {
            for i in 0..6 {
                let a = tile.corners[i];
                let b = tile.corners[(i + 1) % 6];
                neighbors[a as usize].push(b);
                neighbors[b as usize].push(a);
            }
        }

        // Shared boundaries between hexes report the same pair twice.
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self { neighbors }
    }

    /// Whether the intersection id names a real spot on the board.
    pub fn contains(&self, intersection: IntersectionId) -> bool {
        (intersection as usize) < self.neighbors.len()
    }

    /// Whether two distinct intersections share an edge. An
    /// intersection is never adjacent to itself, and unknown ids are
    /// adjacent to nothing.
    pub fn are_adjacent(&self, a: IntersectionId, b: IntersectionId) -> bool {
        if a == b {
            return false;
        }
        match self.neighbors.get(a as usize) {
            Some(list) => list.binary_search(&b).is_ok(),
            None => false,
        }
    }

    /// All intersections adjacent to `intersection`, ascending. Unknown
    /// ids have no neighbors.
    pub fn neighbors_of(&self, intersection: IntersectionId) -> &[IntersectionId] {
        self.neighbors
            .get(intersection as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The edge between two intersections, if they are adjacent.
    pub fn edge_between(&self, a: IntersectionId, b: IntersectionId) -> Option<Edge> {
        if self.are_adjacent(a, b) {
            Some(Edge::new(a, b))
        } else {
            None
        }
    }

    /// Whether an edge value names a real board edge.
    pub fn is_edge(&self, edge: &Edge) -> bool {
        let [a, b] = edge.endpoints();
        self.are_adjacent(a, b)
    }

    /// Every edge on the board, each listed once, in ascending
    /// endpoint order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (a, list) in self.neighbors.iter().enumerate() {
            for &b in list {
                if (a as IntersectionId) < b {
                    edges.push(Edge::new(a as IntersectionId, b));
                }
            }
        }
        edges
    }
}
