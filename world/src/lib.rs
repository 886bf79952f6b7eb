#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state for Diamond Siege.
//!
//! The world mirrors what the host engine reports at the start of a turn and
//! enforces the placement and resource rules the engine applies to spawn and
//! removal requests. Every accepted request is recorded so it can be encoded
//! into the turn submission once the strategy has finished.

pub mod frame;
mod submission;
mod units;

use diamond_siege_core::{
    Battlefield, CellCoord, Command, Edge, Event, Player, RemovalError, ResourceKind, SpawnError,
    StationaryLayout, StationaryUnit, UnitCatalog, UnitKind,
};

pub use submission::{Placement, TurnSubmission};
use units::StationaryGrid;

/// Tolerance applied when dividing fractional balances by unit costs.
const AFFORDABILITY_EPSILON: f32 = 1e-4;

/// Represents the authoritative arena state for a single turn.
#[derive(Clone, Debug)]
pub struct World {
    catalog: UnitCatalog,
    turn: u32,
    grid: StationaryGrid,
    balances: [[f32; 2]; 2],
    accepted: Vec<Command>,
}

impl World {
    /// Creates an empty arena using the default unit catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(UnitCatalog::default())
    }

    /// Creates an empty arena using the provided unit catalog.
    #[must_use]
    pub fn with_catalog(catalog: UnitCatalog) -> Self {
        Self {
            catalog,
            turn: 0,
            grid: StationaryGrid::new(),
            balances: [[0.0; 2]; 2],
            accepted: Vec::new(),
        }
    }

    fn balance(&self, player: Player, kind: ResourceKind) -> f32 {
        self.balances[player.index()][resource_index(kind)]
    }

    fn set_balance(&mut self, player: Player, kind: ResourceKind, amount: f32) {
        self.balances[player.index()][resource_index(kind)] = amount.max(0.0);
    }

    fn try_place(
        &mut self,
        kind: UnitKind,
        owner: Player,
        cell: CellCoord,
    ) -> Result<StationaryUnit, SpawnError> {
        if !kind.is_stationary() {
            return Err(SpawnError::NotDeployable);
        }
        if !cell.in_arena() {
            return Err(SpawnError::OutOfBounds);
        }

        let unit = StationaryUnit::from_catalog(&self.catalog, kind, owner, cell);
        if !self.grid.place(unit) {
            return Err(SpawnError::Occupied);
        }
        Ok(unit)
    }

    fn try_spawn(&mut self, kind: UnitKind, cell: CellCoord, count: u32) -> Result<u32, SpawnError> {
        let Some(resource) = kind.resource() else {
            return Err(SpawnError::NotDeployable);
        };
        if !cell.in_arena() {
            return Err(SpawnError::OutOfBounds);
        }

        let legal_zone = if kind.is_stationary() {
            cell.half() == Player::Own
        } else {
            Edge::of(cell).is_some_and(|edge| edge.owner() == Player::Own)
        };
        if !legal_zone {
            return Err(SpawnError::InvalidZone);
        }
        if self.grid.contains(cell) {
            return Err(SpawnError::Occupied);
        }

        let requested = if kind.is_stationary() { count.min(1) } else { count };
        if requested == 0 {
            return Ok(0);
        }

        let cost = self.catalog.stats(kind).cost;
        let balance = self.balance(Player::Own, resource);
        let affordable = affordable_units(balance, cost, requested);
        if affordable == 0 {
            return Err(SpawnError::InsufficientResources);
        }

        self.set_balance(Player::Own, resource, balance - cost * affordable as f32);
        if kind.is_stationary() {
            let _ = self.grid.place(StationaryUnit::from_catalog(
                &self.catalog,
                kind,
                Player::Own,
                cell,
            ));
        }
        self.accepted.push(Command::Spawn {
            kind,
            cell,
            count: affordable,
        });
        Ok(affordable)
    }

    fn try_remove(&mut self, cell: CellCoord) -> Result<StationaryUnit, RemovalError> {
        let Some(unit) = self.grid.unit_at(cell) else {
            return Err(RemovalError::MissingUnit);
        };
        if unit.owner != Player::Own {
            return Err(RemovalError::NotOwned);
        }

        let removed = self.grid.remove(cell).ok_or(RemovalError::MissingUnit)?;
        self.accepted.push(Command::Remove { cell });
        Ok(removed)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginTurn { turn } => {
            world.turn = turn;
            world.accepted.clear();
            out_events.push(Event::TurnStarted { turn });
        }
        Command::SetResource {
            player,
            kind,
            amount,
        } => {
            world.set_balance(player, kind, amount);
            out_events.push(Event::ResourceChanged {
                player,
                kind,
                amount: world.balance(player, kind),
            });
        }
        Command::PlaceStationary { kind, owner, cell } => {
            match world.try_place(kind, owner, cell) {
                Ok(unit) => out_events.push(Event::StationaryPlaced { unit }),
                Err(reason) => out_events.push(Event::SpawnRejected { kind, cell, reason }),
            }
        }
        Command::Spawn { kind, cell, count } => match world.try_spawn(kind, cell, count) {
            Ok(0) => {}
            Ok(count) => out_events.push(Event::UnitsSpawned { kind, cell, count }),
            Err(reason) => out_events.push(Event::SpawnRejected { kind, cell, reason }),
        },
        Command::Remove { cell } => match world.try_remove(cell) {
            Ok(unit) => out_events.push(Event::UnitRemoved { unit }),
            Err(reason) => out_events.push(Event::RemovalRejected { cell, reason }),
        },
    }
}

impl StationaryLayout for World {
    fn contains_stationary_unit(&self, cell: CellCoord) -> bool {
        query::occupancy_view(self).contains_stationary_unit(cell)
    }

    fn attackers(&self, cell: CellCoord, defender: Player) -> Vec<StationaryUnit> {
        query::occupancy_view(self).attackers(cell, defender)
    }
}

impl Battlefield for World {
    fn attempt_spawn(&mut self, kind: UnitKind, cells: &[CellCoord], count: u32) -> u32 {
        let mut events = Vec::new();
        for &cell in cells {
            apply(self, Command::Spawn { kind, cell, count }, &mut events);
        }

        events
            .iter()
            .map(|event| match event {
                Event::UnitsSpawned { count, .. } => *count,
                Event::SpawnRejected { kind, cell, reason } => {
                    tracing::trace!(?kind, ?cell, %reason, "spawn request dropped");
                    0
                }
                _ => 0,
            })
            .sum()
    }

    fn attempt_remove(&mut self, cells: &[CellCoord]) -> u32 {
        let mut events = Vec::new();
        for &cell in cells {
            apply(self, Command::Remove { cell }, &mut events);
        }

        let mut removed = 0;
        for event in &events {
            match event {
                Event::UnitRemoved { .. } => removed += 1,
                Event::RemovalRejected { cell, reason } => {
                    tracing::trace!(?cell, %reason, "removal request dropped");
                }
                _ => {}
            }
        }
        removed
    }

    fn resource(&self, kind: ResourceKind, player: Player) -> f32 {
        self.balance(player, kind)
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use diamond_siege_core::{
        CellCoord, Player, ResourceKind, StationaryLayout, StationaryUnit, UnitCatalog,
    };

    use super::{StationaryGrid, TurnSubmission, World};

    /// Engine-assigned number of the turn being planned.
    #[must_use]
    pub fn turn(world: &World) -> u32 {
        world.turn
    }

    /// Unit statistics the world enforces costs with.
    #[must_use]
    pub fn catalog(world: &World) -> &UnitCatalog {
        &world.catalog
    }

    /// Current balance of a player's resource pool.
    #[must_use]
    pub fn balance(world: &World, player: Player, kind: ResourceKind) -> f32 {
        world.balance(player, kind)
    }

    /// Stationary unit occupying the cell, if any.
    #[must_use]
    pub fn unit_at(world: &World, cell: CellCoord) -> Option<StationaryUnit> {
        world.grid.unit_at(cell).copied()
    }

    /// Captures every stationary unit in row-major order.
    #[must_use]
    pub fn stationary_units(world: &World) -> Vec<StationaryUnit> {
        world.grid.iter().copied().collect()
    }

    /// Exposes a read-only view of the stationary-unit grid.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        OccupancyView { grid: &world.grid }
    }

    /// Encodes the requests accepted since the turn began.
    #[must_use]
    pub fn submission(world: &World) -> TurnSubmission {
        TurnSubmission::from_commands(&world.accepted, &world.catalog)
    }

    /// Read-only view into the stationary-unit grid.
    #[derive(Clone, Copy, Debug)]
    pub struct OccupancyView<'a> {
        grid: &'a StationaryGrid,
    }

    impl<'a> OccupancyView<'a> {
        /// Returns the stationary unit occupying the provided cell, if any.
        #[must_use]
        pub fn unit_at(&self, cell: CellCoord) -> Option<&'a StationaryUnit> {
            self.grid.unit_at(cell)
        }

        /// Iterates over every stationary unit in row-major order.
        pub fn iter(&self) -> impl Iterator<Item = &'a StationaryUnit> + 'a {
            self.grid.iter()
        }
    }

    impl StationaryLayout for OccupancyView<'_> {
        fn contains_stationary_unit(&self, cell: CellCoord) -> bool {
            self.grid.contains(cell)
        }

        fn attackers(&self, cell: CellCoord, defender: Player) -> Vec<StationaryUnit> {
            let hostile = defender.opponent();
            self.grid
                .iter()
                .filter(|unit| unit.owner == hostile && unit.can_attack(cell))
                .copied()
                .collect()
        }
    }
}

fn resource_index(kind: ResourceKind) -> usize {
    match kind {
        ResourceKind::Structure => 0,
        ResourceKind::Mobile => 1,
    }
}

fn affordable_units(balance: f32, cost: f32, requested: u32) -> u32 {
    if cost <= 0.0 {
        return requested;
    }

    let whole = ((balance + AFFORDABILITY_EPSILON) / cost).floor();
    if whole < 1.0 {
        return 0;
    }
    whole.min(requested as f32) as u32
}
