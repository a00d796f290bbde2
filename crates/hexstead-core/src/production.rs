//! Resource production for dice rolls.
//!
//! A roll hits every tile whose token matches. Each building on a hit
//! tile's boundary earns that tile's resource, once per settlement and
//! twice per city, and a building on several hit tiles earns from each
//! of them. The engine reports the outcome as [`Credit`]s in a fixed
//! order (tiles ascending, owners ascending within a tile) so that two
//! identical rolls on identical boards always read back the same.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::grid::{HexGrid, HexId, Resource};
use crate::player::{PlayerId, ResourceLedger};

/// One tile's payout to one player for a single roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// The producing tile
    pub hex: HexId,
    /// The player being paid
    pub owner: PlayerId,
    /// What the tile yields
    pub resource: Resource,
    /// Cards earned: buildings on the boundary weighted by multiplier
    pub amount: u32,
}

/// Everything a single roll produced, in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    credits: Vec<Credit>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }

    pub fn credits(&self) -> &[Credit] {
        &self.credits
    }

    /// Aggregate the credits into a per-player ledger.
    pub fn totals(&self) -> BTreeMap<PlayerId, ResourceLedger> {
        let mut totals: BTreeMap<PlayerId, ResourceLedger> = BTreeMap::new();
        for credit in &self.credits {
            totals
                .entry(credit.owner)
                .or_default()
                .add(credit.resource, credit.amount);
        }
        totals
    }
}

/// Computes distributions against a fixed grid
#[derive(Debug, Clone, Copy)]
pub struct ProductionEngine<'a> {
    grid: &'a HexGrid,
}

impl<'a> ProductionEngine<'a> {
    pub fn new(grid: &'a HexGrid) -> Self {
        Self { grid }
    }

    /// Work out what a roll produces on the given board. A 7 matches
    /// no token, so it distributes nothing; the desert never pays out.
    pub fn distribute(&self, board: &BoardState, roll: u8) -> Distribution {
        let mut credits = Vec::new();

        for tile in self.grid.tiles() {
            if !tile.produces_on(roll) {
                continue;
            }
            let resource = match tile.terrain.resource() {
                Some(r) => r,
                None => continue,
            };

            let mut corners = tile.corners;
            corners.sort_unstable();

            let mut by_owner: BTreeMap<PlayerId, u32> = BTreeMap::new();
            for corner in corners {
                if let Some(building) = board.building_at(corner) {
                    *by_owner.entry(building.owner()).or_insert(0) +=
                        building.resource_multiplier();
                }
            }

            for (owner, amount) in by_owner {
                credits.push(Credit {
                    hex: tile.id,
                    owner,
                    resource,
                    amount,
                });
            }
        }

        Distribution { credits }
    }
}
