//! Player state and resource accounting.
//!
//! This module contains:
//! - ResourceLedger for per-resource counts
//! - Building costs
//! - Player struct tying a ledger to the pieces on the board
//!
//! Victory points are always derived from the pieces a player holds,
//! never cached, so they cannot drift from the board.

use serde::{Deserialize, Serialize};

use crate::grid::{IntersectionId, Resource};
use crate::topology::Edge;

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// A per-resource count, used both for hands and for costs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub wood: u32,
    pub brick: u32,
    pub wheat: u32,
    pub sheep: u32,
    pub ore: u32,
}

impl ResourceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, wheat: u32, sheep: u32, ore: u32) -> Self {
        Self {
            wood,
            brick,
            wheat,
            sheep,
            ore,
        }
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.wood + self.brick + self.wheat + self.sheep + self.ore
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Wheat => self.wheat,
            Resource::Sheep => self.sheep,
            Resource::Ore => self.ore,
        }
    }

    /// Add resources to the ledger
    pub fn add(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Wood => self.wood += amount,
            Resource::Brick => self.brick += amount,
            Resource::Wheat => self.wheat += amount,
            Resource::Sheep => self.sheep += amount,
            Resource::Ore => self.ore += amount,
        }
    }

    /// Add another ledger to this one
    pub fn add_ledger(&mut self, other: &ResourceLedger) {
        self.wood += other.wood;
        self.brick += other.brick;
        self.wheat += other.wheat;
        self.sheep += other.sheep;
        self.ore += other.ore;
    }

    /// Check if every count covers the cost
    pub fn can_afford(&self, cost: &ResourceLedger) -> bool {
        self.wood >= cost.wood
            && self.brick >= cost.brick
            && self.wheat >= cost.wheat
            && self.sheep >= cost.sheep
            && self.ore >= cost.ore
    }

    /// Subtract a cost (panics if insufficient)
    pub fn subtract(&mut self, cost: &ResourceLedger) {
        assert!(self.can_afford(cost), "Cannot afford this cost");
        self.wood -= cost.wood;
        self.brick -= cost.brick;
        self.wheat -= cost.wheat;
        self.sheep -= cost.sheep;
        self.ore -= cost.ore;
    }

    /// Try to subtract, returning false (and changing nothing) if
    /// insufficient
    pub fn try_subtract(&mut self, cost: &ResourceLedger) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.subtract(cost);
        true
    }
}

/// Building costs
pub mod costs {
    use super::ResourceLedger;

    /// Cost to build a road: 1 wood, 1 brick
    pub fn road() -> ResourceLedger {
        ResourceLedger::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 brick, 1 wheat, 1 sheep
    pub fn settlement() -> ResourceLedger {
        ResourceLedger::with_amounts(1, 1, 1, 1, 0)
    }

    /// Cost to upgrade to a city: 2 wheat, 3 ore
    pub fn city() -> ResourceLedger {
        ResourceLedger::with_amounts(0, 0, 2, 0, 3)
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (0-3)
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Current resources
    pub resources: ResourceLedger,
    /// Intersections holding this player's settlements
    pub settlements: Vec<IntersectionId>,
    /// Intersections holding this player's cities
    pub cities: Vec<IntersectionId>,
    /// Edges holding this player's roads
    pub roads: Vec<Edge>,
}

impl Player {
    /// Create a new player with an empty ledger and no pieces
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            resources: ResourceLedger::new(),
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
        }
    }

    /// Victory points, derived from pieces: 1 per settlement, 2 per
    /// city
    pub fn victory_points(&self) -> u32 {
        self.settlements.len() as u32 + 2 * self.cities.len() as u32
    }

    /// Total resource cards held
    pub fn hand_size(&self) -> u32 {
        self.resources.total()
    }

    pub fn can_afford_road(&self) -> bool {
        self.resources.can_afford(&costs::road())
    }

    pub fn can_afford_settlement(&self) -> bool {
        self.resources.can_afford(&costs::settlement())
    }

    pub fn can_afford_city(&self) -> bool {
        self.resources.can_afford(&costs::city())
    }
}
