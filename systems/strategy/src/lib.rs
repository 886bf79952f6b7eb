#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestrator that spends each turn's resources.
//!
//! A turn runs in a fixed order: seal the previous turn's breach record,
//! place the static defence, advance the maze toggle, send interceptors to the
//! favoured lane and, on offense turns, launch a heavy and a light burst from
//! the least exposed candidate cell. Every spawn goes through the
//! [`Battlefield`] collaborator, which drops blocked or unaffordable requests
//! without affecting later ones.

mod config;
mod maze;

use diamond_siege_core::{
    Battlefield, CellCoord, Lane, Player, ResourceKind, UnitCatalog, UnitKind,
};
use diamond_siege_system_breach::{BreachEvent, BreachRecord, BreachTracker};
use diamond_siege_system_launch::LaunchSelector;
use diamond_siege_system_threat::{DamageEstimate, ThreatEstimator};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use config::{ConfigError, DefenseLayout, LaneSites, StrategyConfig};
pub use maze::MazeAction;
use maze::MazeToggle;

/// Offensive burst launched during a turn.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchReport {
    /// Cell the burst launched from.
    pub cell: CellCoord,
    /// Exposure estimate that won the selection.
    pub damage: DamageEstimate,
    /// Heavy units deployed.
    pub demolishers: u32,
    /// Light units deployed.
    pub scouts: u32,
}

/// Summary of the decisions taken during one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Turn the report describes.
    pub turn: u32,
    /// Breach record sealed for the previous turn, if one was sealed.
    pub sealed: Option<BreachRecord>,
    /// Lane favoured by the breach history.
    pub lane: Lane,
    /// Stationary units placed from the static tables and maze plugs.
    pub structures_placed: u32,
    /// Maze toggle step taken.
    pub maze: MazeAction,
    /// Maze plug supports removed.
    pub structures_removed: u32,
    /// Interceptors deployed.
    pub interceptors: u32,
    /// Offensive burst, present on offense turns with an unblocked launch site.
    pub launch: Option<LaunchReport>,
}

/// Orchestrates defensive placement, lane selection and offensive launches.
#[derive(Debug)]
pub struct Strategy<R = ChaCha8Rng> {
    config: StrategyConfig,
    catalog: UnitCatalog,
    selector: LaunchSelector,
    breaches: BreachTracker,
    maze: MazeToggle,
    rng: R,
}

impl Strategy<ChaCha8Rng> {
    /// Creates an orchestrator whose coin flips derive from `seed`.
    #[must_use]
    pub fn new(config: StrategyConfig, catalog: &UnitCatalog, seed: u64) -> Self {
        Self::with_rng(config, catalog, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Strategy<R> {
    /// Creates an orchestrator drawing coin flips from `rng`.
    #[must_use]
    pub fn with_rng(config: StrategyConfig, catalog: &UnitCatalog, rng: R) -> Self {
        let selector = LaunchSelector::new(ThreatEstimator::from_catalog(catalog));
        let breaches = BreachTracker::new(config.breach);
        Self {
            config,
            catalog: catalog.clone(),
            selector,
            breaches,
            maze: MazeToggle::new(),
            rng,
        }
    }

    /// Configuration the orchestrator was created with.
    #[must_use]
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Breach history feeding the lane bias.
    #[must_use]
    pub fn breaches(&self) -> &BreachTracker {
        &self.breaches
    }

    /// Maze exit currently left open.
    #[must_use]
    pub fn maze_open_side(&self) -> Lane {
        self.maze.open()
    }

    /// Accumulates the breach events of one action frame into the pending
    /// record. Returns how many events damaged the own player.
    pub fn observe_breaches(&mut self, events: &[BreachEvent]) -> usize {
        self.breaches.observe(events)
    }

    /// Plans one deploy turn against the battlefield.
    pub fn play_turn<B>(&mut self, field: &mut B, turn: u32) -> TurnReport
    where
        B: Battlefield,
    {
        let sealed = turn
            .checked_sub(1)
            .and_then(|previous| self.breaches.seal_turn(previous));
        let lane = self.breaches.lane();

        let mut structures_placed = self.place_static_defence(field);

        let maze = self.maze.advance(&mut self.rng);
        if let Some(side) = maze.plugged() {
            structures_placed +=
                field.attempt_spawn(UnitKind::Support, self.config.layout.maze_plug(side), 1);
        }
        let structures_removed = maze
            .unplugged()
            .map_or(0, |side| field.attempt_remove(self.config.layout.maze_plug(side)));
        tracing::debug!(?maze, open = ?self.maze.open(), "maze toggled");

        let interceptors = self.deploy_interceptors(field, lane);
        let offense_turn = turn
            .checked_rem(self.config.offense_period)
            .is_some_and(|phase| phase == self.config.offense_phase);
        let launch = if offense_turn {
            self.launch_offense(field, lane)
        } else {
            None
        };

        let report = TurnReport {
            turn,
            sealed,
            lane,
            structures_placed,
            maze,
            structures_removed,
            interceptors,
            launch,
        };
        tracing::info!(
            turn,
            ?lane,
            structures = report.structures_placed,
            interceptors,
            launched = report.launch.is_some(),
            "turn planned"
        );
        report
    }

    fn place_static_defence<B: Battlefield>(&self, field: &mut B) -> u32 {
        let layout = &self.config.layout;
        let maze_line: Vec<CellCoord> = layout.maze_supports.iter().rev().copied().collect();
        let groups = [
            (UnitKind::Wall, layout.front_walls.clone()),
            (UnitKind::Turret, layout.front_turrets.clone()),
            (UnitKind::Turret, layout.blue_anchors()),
            (UnitKind::Wall, layout.blue_walls.clone()),
            (UnitKind::Turret, layout.blue_turrets.clone()),
            (UnitKind::Wall, layout.teal_walls.clone()),
            (UnitKind::Turret, layout.teal_turrets.clone()),
            (UnitKind::Support, maze_line),
        ];

        groups
            .iter()
            .map(|(kind, cells)| field.attempt_spawn(*kind, cells, 1))
            .sum()
    }

    fn deploy_interceptors<B: Battlefield>(&self, field: &mut B, lane: Lane) -> u32 {
        let own_mobile = field.resource(ResourceKind::Mobile, Player::Own);
        let opponent_mobile = field.resource(ResourceKind::Mobile, Player::Opponent);
        let surge = opponent_mobile > self.config.surge_opponent_mobile
            && own_mobile > self.config.surge_own_mobile;

        let mut lanes = vec![lane];
        if surge {
            lanes.push(lane.opposite());
        }
        let sites: Vec<CellCoord> = lanes
            .iter()
            .flat_map(|lane| self.config.lane(*lane).interceptor_sites.iter().copied())
            .filter(|cell| !field.contains_stationary_unit(*cell))
            .collect();

        let cost = self.catalog.stats(UnitKind::Interceptor).cost;
        let budget = own_mobile * self.config.interceptor_share;
        let count = if cost > 0.0 {
            (budget / cost).floor().max(0.0) as u32
        } else {
            0
        };
        if sites.is_empty() || count == 0 {
            tracing::debug!(?lane, surge, count, "no interceptors deployed");
            return 0;
        }

        let per_site = round_robin(count, sites.len());
        let deployed: u32 = sites
            .iter()
            .zip(per_site)
            .filter(|(_, share)| *share > 0)
            .map(|(cell, share)| field.attempt_spawn(UnitKind::Interceptor, &[*cell], share))
            .sum();
        tracing::debug!(?lane, surge, requested = count, deployed, "interceptors deployed");
        deployed
    }

    fn launch_offense<B: Battlefield>(&mut self, field: &mut B, lane: Lane) -> Option<LaunchReport> {
        let candidates: Vec<CellCoord> = self
            .config
            .lane(lane)
            .launch_candidates
            .iter()
            .copied()
            .filter(|cell| !field.contains_stationary_unit(*cell))
            .collect();
        let Some(choice) = self.selector.select_best(&candidates, &*field) else {
            tracing::warn!(?lane, "every launch candidate is blocked, holding the burst");
            return None;
        };

        let own_mobile = field.resource(ResourceKind::Mobile, Player::Own);
        let heavy = (own_mobile / self.config.heavy_burst_unit_cost).floor().max(0.0) as u32;
        let demolishers = if heavy > 0 {
            field.attempt_spawn(UnitKind::Demolisher, &[choice.cell], heavy)
        } else {
            0
        };
        let scouts = field.attempt_spawn(
            UnitKind::Scout,
            &[choice.cell],
            self.config.light_burst_request,
        );

        tracing::debug!(
            cell = ?choice.cell,
            damage = %choice.damage,
            demolishers,
            scouts,
            "offense launched"
        );
        Some(LaunchReport {
            cell: choice.cell,
            damage: choice.damage,
            demolishers,
            scouts,
        })
    }
}

/// Splits `count` units over `sites` slots, earlier slots taking the remainder.
fn round_robin(count: u32, sites: usize) -> Vec<u32> {
    let Ok(slots) = u32::try_from(sites) else {
        return Vec::new();
    };
    if slots == 0 {
        return Vec::new();
    }
    (0..slots)
        .map(|slot| count / slots + u32::from(slot < count % slots))
        .collect()
}
