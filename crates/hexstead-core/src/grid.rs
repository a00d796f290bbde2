//! The hex board itself: tiles, terrain, and the fixed corner table.
//!
//! This module contains:
//! - Resource and terrain kinds
//! - The 19-hex board and its 6-corner boundary cycles
//! - Layout validation (desert count, token multiset, corner coverage)
//! - Standard (fixed) and shuffled (seeded) layout generation

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hex tile identifier (0-18 on the standard board)
pub type HexId = u8;

/// Intersection identifier (0-53 on the standard board)
pub type IntersectionId = u8;

/// Number of hex tiles on the board
pub const HEX_COUNT: usize = 19;

/// Number of buildable intersections on the board
pub const INTERSECTION_COUNT: usize = 54;

/// Corner cycle of each hex, row-indexed by hex id. Within a row,
/// corner `i` is adjacent to corner `(i + 1) % 6`; every edge on the
/// board is derived from these consecutive pairs and nothing else.
const HEX_CORNERS: [[IntersectionId; 6]; HEX_COUNT] = [
    [41, 42, 40, 18, 17, 39],
    [40, 44, 43, 21, 16, 18],
    [43, 45, 47, 46, 19, 21],
    [38, 39, 17, 15, 14, 37],
    [17, 18, 16, 5, 4, 15],
    [16, 21, 19, 20, 0, 5],
    [19, 46, 48, 49, 22, 20],
    [36, 37, 14, 13, 32, 35],
    [14, 15, 4, 3, 12, 13],
    [4, 5, 0, 1, 2, 3],
    [0, 20, 22, 23, 6, 1],
    [22, 49, 50, 51, 52, 23],
    [34, 13, 12, 11, 32, 33],
    [12, 3, 2, 9, 10, 11],
    [2, 1, 6, 7, 8, 9],
    [6, 23, 52, 53, 24, 7],
    [32, 11, 10, 29, 30, 31],
    [10, 9, 8, 27, 28, 29],
    [8, 7, 24, 25, 26, 27],
];

/// Number tokens carried by the 18 resource tiles, as a multiset.
/// There is no 7; that roll never produces.
const STANDARD_TOKENS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// The desert sits on the center hex in the fixed layout.
const STANDARD_DESERT_HEX: HexId = 9;

/// Resource tiles of the standard board. The fixed layout assigns
/// them to producing hexes in hex-id order.
const STANDARD_RESOURCES: [Resource; 18] = [
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Brick,
    Resource::Brick,
    Resource::Brick,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Ore,
    Resource::Ore,
    Resource::Ore,
];

/// Resource kinds produced by hex tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Wood,
    Brick,
    Wheat,
    Sheep,
    Ore,
}

impl Resource {
    /// All resource kinds
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Wheat,
        Resource::Sheep,
        Resource::Ore,
    ];
}

/// Terrain of a hex tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Produces a resource when its token is rolled
    Producing(Resource),
    /// Never produces, carries no token
    Desert,
}

impl Terrain {
    /// The resource this terrain yields, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Producing(r) => Some(*r),
            Terrain::Desert => None,
        }
    }

    /// Whether this terrain produces at all
    pub fn is_producing(&self) -> bool {
        matches!(self, Terrain::Producing(_))
    }
}

/// A single hex tile on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexTile {
    /// Tile id, also the row of the corner table
    pub id: HexId,
    /// What the tile yields
    pub terrain: Terrain,
    /// Dice total that triggers production (2-12, None for desert)
    pub token: Option<u8>,
    /// Boundary cycle: corner `i` is adjacent to corner `(i + 1) % 6`
    pub corners: [IntersectionId; 6],
}

impl HexTile {
    /// Whether a dice total hits this tile
    pub fn produces_on(&self, roll: u8) -> bool {
        self.token == Some(roll)
    }
}

/// Errors raised while constructing a board layout. These are fatal:
/// a grid that fails validation is never handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    #[error("hex id {0} is out of range")]
    InvalidHexId(HexId),

    #[error("invalid board definition: {0}")]
    InvalidBoardDefinition(String),
}

/// The immutable board description: which tile is where, and which
/// intersections bound it. All adjacency on the board derives from
/// the corner cycles held here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGrid {
    tiles: Vec<HexTile>,
}

impl HexGrid {
    /// The fixed layout: desert in the middle, resources and tokens
    /// assigned in hex-id order.
    pub fn standard() -> Self {
        let mut assignment = Vec::with_capacity(HEX_COUNT);
        let mut next = 0;
        for hex in 0..HEX_COUNT {
            if hex == STANDARD_DESERT_HEX as usize {
                assignment.push((Terrain::Desert, None));
            } else {
                assignment.push((
                    Terrain::Producing(STANDARD_RESOURCES[next]),
                    Some(STANDARD_TOKENS[next]),
                ));
                next += 1;
            }
        }

        Self::from_layout(&assignment).expect("standard layout is valid")
    }

    /// A random layout with the same tile and token multisets as the
    /// standard one. Deterministic for a given RNG state.
    pub fn shuffled_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut terrains: Vec<Terrain> = vec![Terrain::Desert];
        for resource in STANDARD_RESOURCES {
            terrains.push(Terrain::Producing(resource));
        }
        terrains.shuffle(rng);

        let tokens = Self::tokens_avoiding_adjacent_hot(&terrains, rng);

        let mut assignment = Vec::with_capacity(HEX_COUNT);
        let mut next = 0;
        for terrain in &terrains {
            match terrain {
                Terrain::Desert => assignment.push((Terrain::Desert, None)),
                Terrain::Producing(_) => {
                    assignment.push((*terrain, Some(tokens[next])));
                    next += 1;
                }
            }
        }

        Self::from_layout(&assignment).expect("shuffled layout preserves the standard multisets")
    }

    /// Draw token orderings until no 6 or 8 lands next to another 6 or 8,
    /// giving up after a bounded number of attempts. The last draw is
    /// accepted in that case so construction always completes.
    fn tokens_avoiding_adjacent_hot<R: Rng>(terrains: &[Terrain], rng: &mut R) -> Vec<u8> {
        const MAX_ATTEMPTS: usize = 100;

        let producing: Vec<usize> = terrains
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_producing())
            .map(|(hex, _)| hex)
            .collect();

        for _ in 0..MAX_ATTEMPTS {
            let mut tokens = STANDARD_TOKENS.to_vec();
            tokens.shuffle(rng);
            if Self::hot_tokens_separated(&producing, &tokens) {
                return tokens;
            }
        }

        let mut tokens = STANDARD_TOKENS.to_vec();
        tokens.shuffle(rng);
        tokens
    }

    /// Check that no two high-frequency tokens (6 and 8) sit on
    /// neighboring hexes.
    fn hot_tokens_separated(producing: &[usize], tokens: &[u8]) -> bool {
        let mut by_hex = [0u8; HEX_COUNT];
        for (k, &hex) in producing.iter().enumerate() {
            by_hex[hex] = tokens[k];
        }

        for &hex in producing {
            let token = by_hex[hex];
            if token != 6 && token != 8 {
                continue;
            }
            for neighbor in shared_corner_neighbors(hex as HexId) {
                let other = by_hex[neighbor as usize];
                if other == 6 || other == 8 {
                    return false;
                }
            }
        }
        true
    }

    /// Build a grid from a per-hex (terrain, token) assignment over the
    /// fixed corner table, validating the whole layout: corner coverage
    /// and distinctness, exactly one desert, and the standard token
    /// multiset on the 18 producing tiles.
    pub fn from_layout(assignment: &[(Terrain, Option<u8>)]) -> Result<Self, GridError> {
        if assignment.len() != HEX_COUNT {
            return Err(GridError::InvalidBoardDefinition(format!(
                "expected {} tiles, got {}",
                HEX_COUNT,
                assignment.len()
            )));
        }

        Self::validate_corner_table()?;

        let mut desert_count = 0;
        let mut tokens: Vec<u8> = Vec::with_capacity(18);
        for (hex, (terrain, token)) in assignment.iter().enumerate() {
            match (terrain, token) {
                (Terrain::Desert, None) => desert_count += 1,
                (Terrain::Desert, Some(_)) => {
                    return Err(GridError::InvalidBoardDefinition(format!(
                        "desert hex {hex} carries a token"
                    )));
                }
                (Terrain::Producing(_), Some(t)) => tokens.push(*t),
                (Terrain::Producing(_), None) => {
                    return Err(GridError::InvalidBoardDefinition(format!(
                        "producing hex {hex} has no token"
                    )));
                }
            }
        }

        if desert_count != 1 {
            return Err(GridError::InvalidBoardDefinition(format!(
                "expected exactly one desert, got {desert_count}"
            )));
        }

        tokens.sort_unstable();
        if tokens != STANDARD_TOKENS {
            return Err(GridError::InvalidBoardDefinition(format!(
                "token multiset {tokens:?} does not match the standard distribution"
            )));
        }

        let tiles = assignment
            .iter()
            .enumerate()
            .map(|(hex, (terrain, token))| HexTile {
                id: hex as HexId,
                terrain: *terrain,
                token: *token,
                corners: HEX_CORNERS[hex],
            })
            .collect();

        Ok(Self { tiles })
    }

    /// Corner-table invariants: ids in range, six distinct corners per
    /// hex, and every intersection on at least one boundary.
    fn validate_corner_table() -> Result<(), GridError> {
        let mut seen = [false; INTERSECTION_COUNT];
        for (hex, corners) in HEX_CORNERS.iter().enumerate() {
            for (i, &corner) in corners.iter().enumerate() {
                if corner as usize >= INTERSECTION_COUNT {
                    return Err(GridError::InvalidBoardDefinition(format!(
                        "hex {hex} names intersection {corner}, which is out of range"
                    )));
                }
                if corners[..i].contains(&corner) {
                    return Err(GridError::InvalidBoardDefinition(format!(
                        "hex {hex} repeats intersection {corner} in its boundary"
                    )));
                }
                seen[corner as usize] = true;
            }
        }
        if let Some(orphan) = seen.iter().position(|covered| !covered) {
            return Err(GridError::InvalidBoardDefinition(format!(
                "intersection {orphan} is on no hex boundary"
            )));
        }
        Ok(())
    }

    /// The boundary cycle of a hex, in table order.
    pub fn boundary_of(&self, hex: HexId) -> Result<[IntersectionId; 6], GridError> {
        self.tile(hex).map(|tile| tile.corners)
    }

    /// Look up a tile by id.
    pub fn tile(&self, hex: HexId) -> Result<&HexTile, GridError> {
        self.tiles
            .get(hex as usize)
            .ok_or(GridError::InvalidHexId(hex))
    }

    /// All tiles in ascending id order.
    pub fn tiles(&self) -> impl Iterator<Item = &HexTile> {
        self.tiles.iter()
    }

    /// Hexes whose boundaries share at least two corners with `hex`,
    /// i.e. the tiles it physically touches.
    pub fn neighboring_hexes(&self, hex: HexId) -> Result<Vec<HexId>, GridError> {
        if hex as usize >= HEX_COUNT {
            return Err(GridError::InvalidHexId(hex));
        }
        Ok(shared_corner_neighbors(hex))
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::standard()
    }
}

/// Neighborhood on the hex level, derived from the corner table rather
/// than stored: two hexes touch when their boundaries share at least
/// two corners.
fn shared_corner_neighbors(hex: HexId) -> Vec<HexId> {
    let own = &HEX_CORNERS[hex as usize];
    let mut neighbors = Vec::new();
    for (other, corners) in HEX_CORNERS.iter().enumerate() {
        if other == hex as usize {
            continue;
        }
        let shared = corners.iter().filter(|c| own.contains(c)).count();
        if shared >= 2 {
            neighbors.push(other as HexId);
        }
    }
    neighbors
}
