#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Diamond Siege decision engine.
//!
//! This crate defines the vocabulary that connects the in-memory world, the
//! pure decision systems, and the host adapter. The world accepts [`Command`]
//! values describing desired mutations and reports their outcome through
//! [`Event`] values. Systems never touch the world directly: they read it
//! through [`StationaryLayout`] and spend resources through [`Battlefield`],
//! so every decision core can be exercised against a stub collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells spanning the arena along either axis.
pub const ARENA_SIZE: u32 = 28;

/// Number of rows belonging to each player's half of the arena.
pub const HALF_ARENA: u32 = ARENA_SIZE / 2;

/// Identifies one of the two players sharing the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// The player whose decisions this engine makes. Owns the bottom half.
    Own,
    /// The adversary. Owns the top half.
    Opponent,
}

impl Player {
    /// Returns the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Own => Self::Opponent,
            Self::Opponent => Self::Own,
        }
    }

    /// Zero-based index used by the host engine's starter kits.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Own => 0,
            Self::Opponent => 1,
        }
    }
}

/// Location of a single arena cell expressed as column (`x`) and row (`y`).
///
/// Rows grow from the own player's corner toward the opponent. The wire
/// representation is the two-element array `[x, y]` used by the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new arena cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index (`x`) of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index (`y`) of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Squared Euclidean distance between two cell coordinates.
    #[must_use]
    pub fn distance_squared(self, other: CellCoord) -> u64 {
        let dx = u64::from(self.column().abs_diff(other.column()));
        let dy = u64::from(self.row().abs_diff(other.row()));
        dx * dx + dy * dy
    }

    /// Reports whether the cell lies inside the diamond-shaped arena.
    #[must_use]
    pub const fn in_arena(&self) -> bool {
        let (x, y) = (self.column, self.row);
        if y >= ARENA_SIZE {
            return false;
        }

        if y < HALF_ARENA {
            x.saturating_add(y) >= HALF_ARENA - 1 && x <= HALF_ARENA + y
        } else {
            x.saturating_add(HALF_ARENA) >= y && x.saturating_add(y) <= ARENA_SIZE + HALF_ARENA - 1
        }
    }

    /// Player whose half of the arena contains the cell.
    #[must_use]
    pub const fn half(&self) -> Player {
        if self.row < HALF_ARENA {
            Player::Own
        } else {
            Player::Opponent
        }
    }

    /// Neighbouring cell one step in `direction`, if the coordinate stays unsigned.
    ///
    /// Arena membership is not checked; callers combine this with [`Self::in_arena`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::Down => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl From<[u32; 2]> for CellCoord {
    fn from(value: [u32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<CellCoord> for [u32; 2] {
    fn from(value: CellCoord) -> Self {
        [value.column, value.row]
    }
}

/// Orthogonal movement directions on the arena grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward increasing rows (the opponent's corner).
    Up,
    /// Toward decreasing rows (the own corner).
    Down,
    /// Toward decreasing columns.
    Left,
    /// Toward increasing columns.
    Right,
}

impl Direction {
    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One of the four diagonal borders of the diamond arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Opponent border facing the own bottom-right edge.
    TopLeft,
    /// Opponent border facing the own bottom-left edge.
    TopRight,
    /// Own border from which units head toward [`Edge::TopRight`].
    BottomLeft,
    /// Own border from which units head toward [`Edge::TopLeft`].
    BottomRight,
}

impl Edge {
    /// Every edge in deterministic lookup order.
    pub const ALL: [Edge; 4] = [
        Edge::BottomLeft,
        Edge::BottomRight,
        Edge::TopLeft,
        Edge::TopRight,
    ];

    /// Edge a unit launched from `self` tries to reach.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Player that launches mobile units from this edge.
    #[must_use]
    pub const fn owner(self) -> Player {
        match self {
            Self::BottomLeft | Self::BottomRight => Player::Own,
            Self::TopLeft | Self::TopRight => Player::Opponent,
        }
    }

    /// Reports whether the cell lies on this edge.
    #[must_use]
    pub const fn contains(self, cell: CellCoord) -> bool {
        let (x, y) = (cell.column(), cell.row());
        match self {
            Self::BottomLeft => y < HALF_ARENA && x.saturating_add(y) == HALF_ARENA - 1,
            Self::BottomRight => y < HALF_ARENA && x == HALF_ARENA + y,
            Self::TopLeft => y >= HALF_ARENA && y < ARENA_SIZE && x.saturating_add(HALF_ARENA) == y,
            Self::TopRight => {
                y >= HALF_ARENA
                    && y < ARENA_SIZE
                    && x.saturating_add(y) == ARENA_SIZE + HALF_ARENA - 1
            }
        }
    }

    /// Edge that contains the cell, if any. Edges never overlap.
    #[must_use]
    pub fn of(cell: CellCoord) -> Option<Self> {
        Self::ALL.into_iter().find(|edge| edge.contains(cell))
    }

    /// Cells composing the edge, ordered by increasing row.
    #[must_use]
    pub fn cells(self) -> Vec<CellCoord> {
        (0..HALF_ARENA)
            .map(|offset| match self {
                Self::BottomLeft => CellCoord::new(HALF_ARENA - 1 - offset, offset),
                Self::BottomRight => CellCoord::new(HALF_ARENA + offset, offset),
                Self::TopLeft => CellCoord::new(offset, HALF_ARENA + offset),
                Self::TopRight => CellCoord::new(ARENA_SIZE - 1 - offset, HALF_ARENA + offset),
            })
            .collect()
    }

    /// Direction leading straight across the arena toward this edge.
    #[must_use]
    pub const fn straight_ahead(self) -> Direction {
        match self {
            Self::TopLeft | Self::TopRight => Direction::Up,
            Self::BottomLeft | Self::BottomRight => Direction::Down,
        }
    }

    /// Lateral direction leading toward the side this edge lies on.
    #[must_use]
    pub const fn lateral(self) -> Direction {
        match self {
            Self::TopLeft | Self::BottomLeft => Direction::Left,
            Self::TopRight | Self::BottomRight => Direction::Right,
        }
    }
}

/// Half of the board used as the unit of adaptive bias.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Columns at or left of the midline.
    Left,
    /// Columns right of the midline.
    Right,
}

impl Lane {
    /// Buckets a column into a lane using the provided midline threshold.
    #[must_use]
    pub const fn of_column(column: u32, midline: u32) -> Self {
        if column <= midline {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Returns the other lane.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Unit types understood by the host engine, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Cheap stationary blocker.
    Wall,
    /// Stationary unit that boosts allied mobile units.
    Support,
    /// Stationary unit that attacks enemy units in range.
    Turret,
    /// Fast, light mobile attacker.
    Scout,
    /// Slow, heavy, long-range mobile attacker.
    Demolisher,
    /// Mobile unit that hunts enemy mobile units.
    Interceptor,
    /// Pseudo-unit requesting removal of an own stationary unit.
    Remove,
}

impl UnitKind {
    /// Every unit kind in catalog order.
    pub const ALL: [UnitKind; 7] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
        UnitKind::Remove,
    ];

    /// Position of the kind inside the engine's unit catalog.
    #[must_use]
    pub const fn catalog_index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Support => 1,
            Self::Turret => 2,
            Self::Scout => 3,
            Self::Demolisher => 4,
            Self::Interceptor => 5,
            Self::Remove => 6,
        }
    }

    /// Reports whether the kind is placed and stays put.
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, Self::Wall | Self::Support | Self::Turret)
    }

    /// Reports whether the kind walks a path toward an edge.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Scout | Self::Demolisher | Self::Interceptor)
    }

    /// Resource pool paying for the kind, if it can be deployed at all.
    #[must_use]
    pub const fn resource(self) -> Option<ResourceKind> {
        if self.is_stationary() {
            Some(ResourceKind::Structure)
        } else if self.is_mobile() {
            Some(ResourceKind::Mobile)
        } else {
            None
        }
    }
}

/// Regenerating budgets tracked per player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Pays for stationary units.
    Structure,
    /// Pays for mobile units.
    Mobile,
}

/// Engine-provided statistics for one unit kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Short identifier the engine expects in submissions.
    pub shorthand: String,
    /// Resource cost of deploying one unit.
    #[serde(default, alias = "cost1")]
    pub cost: f32,
    /// Attack radius measured in cells.
    #[serde(default, alias = "attackRange")]
    pub range: f32,
    /// Damage dealt per hit.
    #[serde(default, alias = "attackDamageWalker")]
    pub damage: f32,
}

impl UnitStats {
    /// Creates a stats entry with explicit values.
    #[must_use]
    pub fn new(shorthand: &str, cost: f32, range: f32, damage: f32) -> Self {
        Self {
            shorthand: shorthand.to_owned(),
            cost,
            range,
            damage,
        }
    }
}

/// Unit statistics resolved once from the engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UnitStats>", into = "Vec<UnitStats>")]
pub struct UnitCatalog {
    entries: Vec<UnitStats>,
}

impl UnitCatalog {
    /// Builds a catalog from entries listed in [`UnitKind::ALL`] order.
    ///
    /// Returns `None` when fewer entries than unit kinds are supplied. Extra
    /// trailing entries (such as upgrade pseudo-units) are ignored.
    #[must_use]
    pub fn from_entries(mut entries: Vec<UnitStats>) -> Option<Self> {
        if entries.len() < UnitKind::ALL.len() {
            return None;
        }
        entries.truncate(UnitKind::ALL.len());
        Some(Self { entries })
    }

    /// Statistics for the provided kind.
    #[must_use]
    pub fn stats(&self, kind: UnitKind) -> &UnitStats {
        &self.entries[kind.catalog_index()]
    }

    /// Resolves a submission shorthand back into its unit kind.
    #[must_use]
    pub fn kind_for_shorthand(&self, shorthand: &str) -> Option<UnitKind> {
        UnitKind::ALL
            .into_iter()
            .find(|kind| self.stats(*kind).shorthand == shorthand)
    }
}

impl TryFrom<Vec<UnitStats>> for UnitCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<UnitStats>) -> Result<Self, Self::Error> {
        let found = entries.len();
        Self::from_entries(entries).ok_or(CatalogError::Incomplete {
            found,
            expected: UnitKind::ALL.len(),
        })
    }
}

impl From<UnitCatalog> for Vec<UnitStats> {
    fn from(catalog: UnitCatalog) -> Self {
        catalog.entries
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                UnitStats::new("FF", 1.0, 0.0, 0.0),
                UnitStats::new("EF", 4.0, 3.0, 0.0),
                UnitStats::new("DF", 3.0, 3.0, 4.0),
                UnitStats::new("PI", 1.0, 3.0, 1.0),
                UnitStats::new("EI", 3.0, 4.5, 3.0),
                UnitStats::new("SI", 1.0, 3.0, 0.0),
                UnitStats::new("RM", 0.0, 0.0, 0.0),
            ],
        }
    }
}

/// Placed, non-moving unit as observed by the decision systems.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationaryUnit {
    /// Kind of stationary unit.
    pub kind: UnitKind,
    /// Player that placed the unit.
    pub owner: Player,
    /// Cell occupied by the unit.
    pub cell: CellCoord,
    /// Attack radius measured in cells.
    pub range: f32,
    /// Damage dealt per hit.
    pub damage: f32,
}

impl StationaryUnit {
    /// Creates a unit snapshot using the catalog statistics for its kind.
    #[must_use]
    pub fn from_catalog(
        catalog: &UnitCatalog,
        kind: UnitKind,
        owner: Player,
        cell: CellCoord,
    ) -> Self {
        let stats = catalog.stats(kind);
        Self {
            kind,
            owner,
            cell,
            range: stats.range,
            damage: stats.damage,
        }
    }

    /// Reports whether the unit can hit the provided cell.
    #[must_use]
    pub fn can_attack(&self, cell: CellCoord) -> bool {
        if self.damage <= 0.0 || self.range <= 0.0 {
            return false;
        }

        let distance_squared = self.cell.distance_squared(cell) as f32;
        distance_squared <= self.range * self.range
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a new turn, clearing the previous submission.
    BeginTurn {
        /// Engine-assigned turn number.
        turn: u32,
    },
    /// Overwrites a player's resource balance.
    SetResource {
        /// Player whose balance changes.
        player: Player,
        /// Resource pool being set.
        kind: ResourceKind,
        /// New balance.
        amount: f32,
    },
    /// Places a stationary unit without charging for it. Used to mirror engine state.
    PlaceStationary {
        /// Kind of stationary unit.
        kind: UnitKind,
        /// Player owning the unit.
        owner: Player,
        /// Cell receiving the unit.
        cell: CellCoord,
    },
    /// Requests that the own player deploy units at a cell, paying for each one.
    Spawn {
        /// Kind of unit to deploy.
        kind: UnitKind,
        /// Cell receiving the units.
        cell: CellCoord,
        /// Number of units requested. Only mobile kinds stack.
        count: u32,
    },
    /// Requests removal of an own stationary unit.
    Remove {
        /// Cell holding the unit to remove.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new turn started.
    TurnStarted {
        /// Engine-assigned turn number.
        turn: u32,
    },
    /// Confirms that a resource balance changed.
    ResourceChanged {
        /// Player whose balance changed.
        player: Player,
        /// Resource pool that changed.
        kind: ResourceKind,
        /// Balance after the change.
        amount: f32,
    },
    /// Confirms that a stationary unit was mirrored into the world.
    StationaryPlaced {
        /// Snapshot of the placed unit.
        unit: StationaryUnit,
    },
    /// Confirms that units were deployed.
    UnitsSpawned {
        /// Kind of unit deployed.
        kind: UnitKind,
        /// Cell receiving the units.
        cell: CellCoord,
        /// Number of units actually deployed.
        count: u32,
    },
    /// Reports that a deployment request was rejected.
    SpawnRejected {
        /// Kind of unit requested.
        kind: UnitKind,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the request failed.
        reason: SpawnError,
    },
    /// Confirms that an own stationary unit was removed.
    UnitRemoved {
        /// Snapshot of the removed unit.
        unit: StationaryUnit,
    },
    /// Reports that a removal request was rejected.
    RemovalRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
}

/// Reasons a deployment request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SpawnError {
    /// The requested cell lies outside the arena.
    #[error("cell lies outside the arena")]
    OutOfBounds,
    /// The cell is not a legal deployment location for the kind.
    #[error("cell is not a legal deployment location for this unit")]
    InvalidZone,
    /// A stationary unit already occupies the cell.
    #[error("cell is already occupied by a stationary unit")]
    Occupied,
    /// The player cannot afford even a single unit.
    #[error("insufficient resources")]
    InsufficientResources,
    /// The kind cannot be deployed at all.
    #[error("unit kind cannot be deployed")]
    NotDeployable,
}

/// Reasons a unit catalog cannot be assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Fewer entries than unit kinds were supplied.
    #[error("catalog lists {found} unit kinds, expected at least {expected}")]
    Incomplete {
        /// Entries supplied.
        found: usize,
        /// Entries required.
        expected: usize,
    },
}

/// Reasons a removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RemovalError {
    /// No stationary unit occupies the cell.
    #[error("no stationary unit at cell")]
    MissingUnit,
    /// The unit at the cell belongs to the opponent.
    #[error("stationary unit belongs to the opponent")]
    NotOwned,
}

/// Read-only query surface over the current stationary-unit placement.
pub trait StationaryLayout {
    /// Reports whether the cell holds a stationary unit of either player.
    fn contains_stationary_unit(&self, cell: CellCoord) -> bool;

    /// Stationary units hostile to `defender` whose attacks reach `cell`.
    fn attackers(&self, cell: CellCoord, defender: Player) -> Vec<StationaryUnit>;
}

/// Mutating collaborator surface through which turns spend resources.
///
/// Implementations silently drop requests that are blocked or unaffordable;
/// a failed cell never prevents later cells in the same batch from trying.
pub trait Battlefield: StationaryLayout {
    /// Attempts to deploy `count` units of `kind` at every provided cell.
    ///
    /// Returns the number of units actually deployed across all cells.
    fn attempt_spawn(&mut self, kind: UnitKind, cells: &[CellCoord], count: u32) -> u32;

    /// Attempts to remove own stationary units at every provided cell.
    ///
    /// Returns the number of units removed.
    fn attempt_remove(&mut self, cells: &[CellCoord]) -> u32;

    /// Current balance of the requested resource for the player.
    fn resource(&self, kind: ResourceKind, player: Player) -> f32;
}

#[cfg(test)]
mod tests {
    use super::{
        CatalogError, CellCoord, Edge, Lane, Player, RemovalError, SpawnError, StationaryUnit,
        UnitCatalog, UnitKind, UnitStats, ARENA_SIZE,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(13, 27));
    }

    #[test]
    fn spawn_error_round_trips_through_bincode() {
        assert_round_trip(&SpawnError::InsufficientResources);
        assert_round_trip(&RemovalError::NotOwned);
    }

    #[test]
    fn cell_coord_uses_engine_pair_format() {
        let json = serde_json::to_string(&CellCoord::new(3, 12)).expect("serialize");
        assert_eq!(json, "[3,12]");
        let cell: CellCoord = serde_json::from_str("[24, 13]").expect("deserialize");
        assert_eq!(cell, CellCoord::new(24, 13));
    }

    #[test]
    fn arena_is_a_diamond() {
        assert!(CellCoord::new(13, 0).in_arena());
        assert!(CellCoord::new(14, 0).in_arena());
        assert!(!CellCoord::new(12, 0).in_arena());
        assert!(!CellCoord::new(15, 0).in_arena());
        assert!(CellCoord::new(0, 13).in_arena());
        assert!(CellCoord::new(27, 14).in_arena());
        assert!(CellCoord::new(13, 27).in_arena());
        assert!(!CellCoord::new(12, 27).in_arena());
        assert!(!CellCoord::new(13, ARENA_SIZE).in_arena());

        let count = (0..ARENA_SIZE)
            .flat_map(|row| (0..ARENA_SIZE).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| cell.in_arena())
            .count();
        assert_eq!(count, 420);
    }

    #[test]
    fn edges_hold_fourteen_arena_cells_each() {
        for edge in Edge::ALL {
            let cells = edge.cells();
            assert_eq!(cells.len(), 14);
            for cell in cells {
                assert!(cell.in_arena(), "{edge:?} cell {cell:?} outside arena");
                assert_eq!(Edge::of(cell), Some(edge));
            }
            assert_eq!(edge.opposite().opposite(), edge);
            assert_ne!(edge.owner(), edge.opposite().owner());
        }
    }

    #[test]
    fn launch_corners_belong_to_distinct_edges() {
        assert_eq!(Edge::of(CellCoord::new(13, 0)), Some(Edge::BottomLeft));
        assert_eq!(Edge::of(CellCoord::new(14, 0)), Some(Edge::BottomRight));
        assert_eq!(Edge::of(CellCoord::new(0, 13)), Some(Edge::BottomLeft));
        assert_eq!(Edge::of(CellCoord::new(0, 14)), Some(Edge::TopLeft));
        assert_eq!(Edge::of(CellCoord::new(13, 5)), None);
    }

    #[test]
    fn lane_midline_is_inclusive_on_the_left() {
        assert_eq!(Lane::of_column(13, 13), Lane::Left);
        assert_eq!(Lane::of_column(14, 13), Lane::Right);
        assert_eq!(Lane::Left.opposite(), Lane::Right);
    }

    #[test]
    fn turret_attacks_within_euclidean_range() {
        let catalog = UnitCatalog::default();
        let turret = StationaryUnit::from_catalog(
            &catalog,
            UnitKind::Turret,
            Player::Opponent,
            CellCoord::new(13, 16),
        );
        assert!(turret.can_attack(CellCoord::new(13, 13)));
        assert!(turret.can_attack(CellCoord::new(15, 14)));
        assert!(!turret.can_attack(CellCoord::new(15, 13)));

        let wall = StationaryUnit::from_catalog(
            &catalog,
            UnitKind::Wall,
            Player::Opponent,
            CellCoord::new(13, 16),
        );
        assert!(!wall.can_attack(CellCoord::new(13, 15)));
    }

    #[test]
    fn catalog_requires_every_kind() {
        let short = vec![UnitStats::new("FF", 1.0, 0.0, 0.0)];
        assert!(UnitCatalog::from_entries(short).is_none());

        let catalog = UnitCatalog::default();
        assert_eq!(catalog.kind_for_shorthand("DF"), Some(UnitKind::Turret));
        assert_eq!(catalog.kind_for_shorthand("XX"), None);
        assert_eq!(catalog.stats(UnitKind::Remove).shorthand, "RM");
    }

    #[test]
    fn deserialized_catalogs_are_checked_for_completeness() {
        assert_round_trip(&UnitCatalog::default());

        let short = vec![UnitStats::new("FF", 1.0, 0.0, 0.0)];
        assert_eq!(
            UnitCatalog::try_from(short),
            Err(CatalogError::Incomplete {
                found: 1,
                expected: UnitKind::ALL.len(),
            })
        );

        let error = serde_json::from_str::<UnitCatalog>(r#"[{"shorthand":"FF"}]"#)
            .expect_err("one entry is not a catalog");
        assert!(error.to_string().contains("expected at least"));
    }

    #[test]
    fn unit_stats_accept_engine_field_aliases() {
        let stats: UnitStats = serde_json::from_str(
            r#"{"shorthand":"DF","cost1":6.0,"attackRange":3.5,"attackDamageWalker":5.0}"#,
        )
        .expect("deserialize");
        assert_eq!(stats, UnitStats::new("DF", 6.0, 3.5, 5.0));

        let removal: UnitStats = serde_json::from_str(r#"{"shorthand":"RM"}"#).expect("deserialize");
        assert_eq!(removal.cost, 0.0);
    }

    #[test]
    fn unit_kinds_report_resource_pools() {
        assert!(UnitKind::Turret.is_stationary());
        assert!(UnitKind::Scout.is_mobile());
        assert!(UnitKind::Remove.resource().is_none());
        for (index, kind) in UnitKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.catalog_index(), index);
        }
        assert_eq!(Player::Own.opponent(), Player::Opponent);
    }
}
