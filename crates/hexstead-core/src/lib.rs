//! Hexstead - a hex-grid settlement game engine
//!
//! This crate provides the core game logic for Hexstead, including:
//! - The hexagonal board layout with terrains and number tokens
//! - Intersection adjacency derived from the tile geometry
//! - Placement rules for settlements, cities, and roads
//! - Resource production paid out from dice rolls
//! - A minimal game loop driver with a random policy and dice
//!
//! # Architecture
//!
//! The board geometry ([`grid`], [`topology`]) is immutable once built.
//! Everything that changes during play lives in [`board`] and [`player`],
//! and [`game`] ties the two halves together: it borrows the geometry and
//! owns the mutable state, so several games can share one board layout.
//!
//! # Modules
//!
//! - [`grid`]: Hex tiles, terrains, tokens, and the corner table
//! - [`topology`]: Intersection adjacency and the edge set
//! - [`board`]: Placed buildings and roads
//! - [`player`]: Player state and resource ledgers
//! - [`rules`]: Placement legality checks
//! - [`production`]: Dice-roll payouts
//! - [`game`]: Action application and victory detection
//! - [`dice`]: Two-dice roller that skips sevens
//! - [`policy`]: Random build-candidate picker for simulations

pub mod board;
pub mod dice;
pub mod game;
pub mod grid;
pub mod player;
pub mod policy;
pub mod production;
pub mod rules;
pub mod topology;

// Re-export commonly used types
pub use board::{BoardError, BoardState, Building};
pub use dice::Dice;
pub use game::{Action, ActionError, Game, VICTORY_POINTS_TO_WIN};
pub use grid::{
    GridError, HexGrid, HexId, HexTile, IntersectionId, Resource, Terrain, HEX_COUNT,
    INTERSECTION_COUNT,
};
pub use player::{costs, Player, PlayerId, ResourceLedger};
pub use policy::{RandomPolicy, FORCED_SPEND_HAND};
pub use production::{Credit, Distribution, ProductionEngine};
pub use rules::PlacementRules;
pub use topology::{Edge, Topology};
