#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Launch-site selection by minimum projected damage exposure.

use diamond_siege_core::{CellCoord, Player, StationaryLayout};
use diamond_siege_system_pathing::{PathProjection, PathProjector};
use diamond_siege_system_threat::{DamageEstimate, ThreatEstimator};

/// Launch site chosen for an offensive burst.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchChoice {
    /// Candidate cell that scored lowest.
    pub cell: CellCoord,
    /// Estimated exposure along the projected path from `cell`.
    pub damage: DamageEstimate,
    /// Projected path the estimate was computed from.
    pub path: PathProjection,
}

/// Scores candidate launch cells and keeps the least exposed one.
#[derive(Debug)]
pub struct LaunchSelector {
    projector: PathProjector,
    estimator: ThreatEstimator,
    attacker: Player,
}

impl LaunchSelector {
    /// Creates a selector scoring paths walked by the own player's units.
    #[must_use]
    pub fn new(estimator: ThreatEstimator) -> Self {
        Self {
            projector: PathProjector::default(),
            estimator,
            attacker: Player::Own,
        }
    }

    /// Projects and scores a single launch cell.
    pub fn evaluate<L>(&mut self, launch: CellCoord, layout: &L) -> LaunchChoice
    where
        L: StationaryLayout + ?Sized,
    {
        let path = self.projector.project(launch, layout);
        let damage = self
            .estimator
            .estimate_damage(path.cells(), self.attacker, layout);
        LaunchChoice {
            cell: launch,
            damage,
            path,
        }
    }

    /// Returns the candidate with the strictly smallest estimate.
    ///
    /// Equal estimates keep the earliest candidate in `candidates`. Returns
    /// `None` only when no candidate is supplied.
    pub fn select_best<L>(&mut self, candidates: &[CellCoord], layout: &L) -> Option<LaunchChoice>
    where
        L: StationaryLayout + ?Sized,
    {
        let mut best: Option<LaunchChoice> = None;
        for &candidate in candidates {
            let choice = self.evaluate(candidate, layout);
            tracing::debug!(
                cell = ?choice.cell,
                damage = %choice.damage,
                steps = choice.path.steps(),
                "scored launch candidate"
            );

            let replace = match &best {
                Some(current) => choice.damage < current.damage,
                None => true,
            };
            if replace {
                best = Some(choice);
            }
        }
        best
    }
}
