//! Static placement tables and tuning for the turn orchestrator.

use std::{fs, path::Path};

use anyhow::Context;
use diamond_siege_core::{CellCoord, Lane};
use diamond_siege_system_breach::BreachConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a strategy configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A lane lists no launch candidates.
    #[error("{0:?} lane has no launch candidates")]
    EmptyLaunchCandidates(Lane),
    /// The offense period is zero.
    #[error("offense period must be positive")]
    ZeroOffensePeriod,
    /// The offense phase can never match the period.
    #[error("offense phase {phase} must be smaller than period {period}")]
    PhaseOutOfRange {
        /// Configured phase.
        phase: u32,
        /// Configured period.
        period: u32,
    },
    /// The breach history cannot hold a single record.
    #[error("breach history capacity must be positive")]
    ZeroBreachCapacity,
    /// The breach history capacity exceeds what a match can use.
    #[error("breach history capacity {0} exceeds the limit of {max}", max = BreachConfig::MAX_CAPACITY)]
    BreachCapacityTooLarge(usize),
    /// The interceptor share is outside `0.0..=1.0`.
    #[error("interceptor share {0} must lie within 0.0..=1.0")]
    InvalidInterceptorShare(f32),
    /// The heavy burst divisor is not positive.
    #[error("heavy burst unit cost {0} must be positive")]
    InvalidHeavyBurstCost(f32),
    /// A configured cell lies outside the arena.
    #[error("{group} lists cell {cell:?} outside the arena")]
    CellOutsideArena {
        /// Table holding the cell.
        group: &'static str,
        /// Offending cell.
        cell: CellCoord,
    },
}

/// Stationary placement tables, all within the own half.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseLayout {
    /// Walls shielding the front corners.
    pub front_walls: Vec<CellCoord>,
    /// Turrets behind the front walls.
    pub front_turrets: Vec<CellCoord>,
    /// Support line forming the maze, placed last entry first.
    pub maze_supports: Vec<CellCoord>,
    /// Supports plugging the left exit of the maze.
    pub maze_left: Vec<CellCoord>,
    /// Supports plugging the right exit of the maze.
    pub maze_right: Vec<CellCoord>,
    /// Primary reinforcement turrets. The first two and last two are anchors.
    pub blue_turrets: Vec<CellCoord>,
    /// Primary reinforcement walls.
    pub blue_walls: Vec<CellCoord>,
    /// Secondary reinforcement turrets.
    pub teal_turrets: Vec<CellCoord>,
    /// Secondary reinforcement walls.
    pub teal_walls: Vec<CellCoord>,
}

impl DefenseLayout {
    /// Supports of the plug on the given lane.
    #[must_use]
    pub fn maze_plug(&self, lane: Lane) -> &[CellCoord] {
        match lane {
            Lane::Left => &self.maze_left,
            Lane::Right => &self.maze_right,
        }
    }

    /// First two and last two primary turrets.
    #[must_use]
    pub fn blue_anchors(&self) -> Vec<CellCoord> {
        let head = self.blue_turrets.iter().take(2);
        let tail_start = self.blue_turrets.len().saturating_sub(2).max(2);
        let tail = self.blue_turrets.iter().skip(tail_start);
        head.chain(tail).copied().collect()
    }

    fn groups(&self) -> [(&'static str, &[CellCoord]); 9] {
        [
            ("front_walls", self.front_walls.as_slice()),
            ("front_turrets", self.front_turrets.as_slice()),
            ("maze_supports", self.maze_supports.as_slice()),
            ("maze_left", self.maze_left.as_slice()),
            ("maze_right", self.maze_right.as_slice()),
            ("blue_turrets", self.blue_turrets.as_slice()),
            ("blue_walls", self.blue_walls.as_slice()),
            ("teal_turrets", self.teal_turrets.as_slice()),
            ("teal_walls", self.teal_walls.as_slice()),
        ]
    }
}

impl Default for DefenseLayout {
    fn default() -> Self {
        Self {
            front_walls: cells(&[
                [0, 13],
                [1, 13],
                [3, 13],
                [24, 13],
                [26, 13],
                [27, 13],
                [5, 12],
                [22, 12],
            ]),
            front_turrets: cells(&[
                [2, 12],
                [3, 12],
                [24, 12],
                [25, 12],
                [4, 11],
                [5, 11],
                [22, 11],
                [23, 11],
            ]),
            maze_supports: cells(&[
                [8, 8],
                [9, 8],
                [10, 8],
                [11, 8],
                [12, 8],
                [13, 8],
                [14, 8],
                [15, 8],
                [16, 8],
                [17, 8],
                [18, 8],
                [19, 8],
                [7, 6],
                [9, 6],
                [10, 6],
                [11, 6],
                [12, 6],
                [13, 6],
                [14, 6],
                [15, 6],
                [16, 6],
                [17, 6],
                [18, 6],
                [20, 6],
                [10, 5],
                [11, 5],
                [12, 5],
                [13, 5],
                [14, 5],
                [15, 5],
                [16, 5],
                [17, 5],
                [10, 3],
                [12, 3],
                [13, 3],
                [14, 3],
                [15, 3],
                [17, 3],
                [13, 2],
                [14, 2],
            ]),
            maze_left: cells(&[[7, 7], [17, 4], [12, 1]]),
            maze_right: cells(&[[20, 7], [10, 4], [15, 1]]),
            blue_turrets: cells(&[
                [6, 11],
                [7, 11],
                [8, 11],
                [9, 11],
                [18, 11],
                [19, 11],
                [20, 11],
                [21, 11],
                [8, 10],
                [9, 10],
                [10, 10],
                [17, 10],
                [18, 10],
                [19, 10],
                [10, 9],
                [17, 9],
            ]),
            blue_walls: cells(&[
                [7, 12],
                [9, 12],
                [18, 12],
                [20, 12],
                [10, 11],
                [17, 11],
                [11, 10],
                [16, 10],
            ]),
            teal_turrets: cells(&[
                [1, 12],
                [26, 12],
                [2, 11],
                [3, 11],
                [24, 11],
                [25, 11],
                [7, 10],
                [20, 10],
                [8, 9],
                [9, 9],
                [18, 9],
                [19, 9],
            ]),
            teal_walls: cells(&[[8, 12], [19, 12], [12, 10], [15, 10]]),
        }
    }
}

/// Deployment sites owned by one lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneSites {
    /// Cells receiving defensive interceptors.
    pub interceptor_sites: Vec<CellCoord>,
    /// Edge cells evaluated as offensive launch sites, in preference order.
    pub launch_candidates: Vec<CellCoord>,
}

/// Immutable tuning for [`crate::Strategy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Stationary placement tables.
    pub layout: DefenseLayout,
    /// Sites used when the left lane is favoured.
    pub left: LaneSites,
    /// Sites used when the right lane is favoured.
    pub right: LaneSites,
    /// Fraction of the own mobile balance spent on interceptors.
    pub interceptor_share: f32,
    /// Opponent mobile balance above which both lanes are defended.
    pub surge_opponent_mobile: f32,
    /// Own mobile balance required before defending both lanes.
    pub surge_own_mobile: f32,
    /// Offense runs on turns where `turn % offense_period == offense_phase`.
    pub offense_period: u32,
    /// See [`Self::offense_period`].
    pub offense_phase: u32,
    /// Mobile balance set aside per heavy unit in the offensive burst.
    pub heavy_burst_unit_cost: f32,
    /// Oversized light-unit request that drains the remaining mobile balance.
    pub light_burst_request: u32,
    /// Breach history tuning.
    pub breach: BreachConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            layout: DefenseLayout::default(),
            left: LaneSites {
                interceptor_sites: cells(&[[4, 9], [6, 7]]),
                launch_candidates: cells(&[[13, 0], [12, 1], [11, 2]]),
            },
            right: LaneSites {
                interceptor_sites: cells(&[[23, 9], [21, 7]]),
                launch_candidates: cells(&[[14, 0], [15, 1], [16, 2]]),
            },
            interceptor_share: 0.25,
            surge_opponent_mobile: 10.0,
            surge_own_mobile: 7.0,
            offense_period: 2,
            offense_phase: 1,
            heavy_burst_unit_cost: 21.0,
            light_burst_request: 1000,
            breach: BreachConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read strategy config at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid strategy config at {}", path.display()))
    }

    /// Parses and validates TOML contents. Omitted keys keep their defaults.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse strategy config toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Sites belonging to the given lane.
    #[must_use]
    pub fn lane(&self, lane: Lane) -> &LaneSites {
        match lane {
            Lane::Left => &self.left,
            Lane::Right => &self.right,
        }
    }

    /// Checks the invariants the orchestrator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for lane in [Lane::Left, Lane::Right] {
            if self.lane(lane).launch_candidates.is_empty() {
                return Err(ConfigError::EmptyLaunchCandidates(lane));
            }
        }
        if self.offense_period == 0 {
            return Err(ConfigError::ZeroOffensePeriod);
        }
        if self.offense_phase >= self.offense_period {
            return Err(ConfigError::PhaseOutOfRange {
                phase: self.offense_phase,
                period: self.offense_period,
            });
        }
        if self.breach.capacity == 0 {
            return Err(ConfigError::ZeroBreachCapacity);
        }
        if self.breach.capacity > BreachConfig::MAX_CAPACITY {
            return Err(ConfigError::BreachCapacityTooLarge(self.breach.capacity));
        }
        if !(0.0..=1.0).contains(&self.interceptor_share) {
            return Err(ConfigError::InvalidInterceptorShare(self.interceptor_share));
        }
        if !self.heavy_burst_unit_cost.is_finite() || self.heavy_burst_unit_cost <= 0.0 {
            return Err(ConfigError::InvalidHeavyBurstCost(self.heavy_burst_unit_cost));
        }

        let lane_groups = [
            ("left.interceptor_sites", self.left.interceptor_sites.as_slice()),
            ("left.launch_candidates", self.left.launch_candidates.as_slice()),
            ("right.interceptor_sites", self.right.interceptor_sites.as_slice()),
            ("right.launch_candidates", self.right.launch_candidates.as_slice()),
        ];
        for (group, cells) in self.layout.groups().into_iter().chain(lane_groups) {
            if let Some(cell) = cells.iter().find(|cell| !cell.in_arena()) {
                return Err(ConfigError::CellOutsideArena { group, cell: *cell });
            }
        }
        Ok(())
    }
}

fn cells(pairs: &[[u32; 2]]) -> Vec<CellCoord> {
    pairs.iter().copied().map(CellCoord::from).collect()
}
