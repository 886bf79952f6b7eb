#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Damage-exposure estimation along projected mobile-unit paths.
//!
//! Every hostile stationary unit able to reach a path cell contributes the
//! configured per-hit damage once for that cell. A turret covering several
//! cells of the same path is therefore counted once per cell, modelling
//! sustained fire along the route. The result ranks launch sites against each
//! other and is not a prediction of health lost.

use std::{cmp::Ordering, fmt};

use diamond_siege_core::{CellCoord, Player, StationaryLayout, UnitCatalog, UnitKind};
use serde::{Deserialize, Serialize};

/// Non-negative relative damage score attached to one projected path.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DamageEstimate(f32);

impl DamageEstimate {
    /// Estimate of a path that no attacker covers.
    pub const ZERO: Self = Self(0.0);

    /// Raw score value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Total ordering used when ranking estimates. Scores are never NaN.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DamageEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Scores paths by the hostile fire they cross.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreatEstimator {
    per_hit_damage: f32,
}

impl ThreatEstimator {
    /// Creates an estimator charging `per_hit_damage` per attacker per cell.
    ///
    /// Negative or non-finite values are clamped to zero so estimates stay
    /// non-negative.
    #[must_use]
    pub fn new(per_hit_damage: f32) -> Self {
        let per_hit_damage = if per_hit_damage.is_finite() {
            per_hit_damage.max(0.0)
        } else {
            0.0
        };
        Self { per_hit_damage }
    }

    /// Uses the turret's per-hit damage from the engine catalog.
    #[must_use]
    pub fn from_catalog(catalog: &UnitCatalog) -> Self {
        Self::new(catalog.stats(UnitKind::Turret).damage)
    }

    /// Damage charged for one attacker covering one path cell.
    #[must_use]
    pub fn per_hit_damage(&self) -> f32 {
        self.per_hit_damage
    }

    /// Sums the damage `defender` is exposed to while walking `path`.
    #[must_use]
    pub fn estimate_damage<L>(
        &self,
        path: &[CellCoord],
        defender: Player,
        layout: &L,
    ) -> DamageEstimate
    where
        L: StationaryLayout + ?Sized,
    {
        let hits: usize = exposure(path, defender, layout).into_iter().sum();
        DamageEstimate(hits as f32 * self.per_hit_damage)
    }
}

/// Number of hostile attackers covering each cell of `path`, in path order.
#[must_use]
pub fn exposure<L>(path: &[CellCoord], defender: Player, layout: &L) -> Vec<usize>
where
    L: StationaryLayout + ?Sized,
{
    path.iter()
        .map(|cell| layout.attackers(*cell, defender).len())
        .collect()
}
