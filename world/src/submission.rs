//! Encoding of accepted requests into the two lines the host engine reads.

use diamond_siege_core::{CellCoord, Command, UnitCatalog, UnitKind};
use serde::{Deserialize, Serialize};

/// Single `[shorthand, x, y]` entry of a submission line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement(pub String, pub u32, pub u32);

impl Placement {
    fn new(catalog: &UnitCatalog, kind: UnitKind, cell: CellCoord) -> Self {
        Self(
            catalog.stats(kind).shorthand.clone(),
            cell.column(),
            cell.row(),
        )
    }
}

/// Stationary and mobile requests accepted during one turn.
///
/// Removals travel with the stationary placements, mobile deployments are
/// listed once per unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSubmission {
    build: Vec<Placement>,
    deploy: Vec<Placement>,
}

impl TurnSubmission {
    pub(crate) fn from_commands(commands: &[Command], catalog: &UnitCatalog) -> Self {
        let mut submission = Self::default();
        for command in commands {
            match *command {
                Command::Spawn { kind, cell, count } if kind.is_mobile() => {
                    let placement = Placement::new(catalog, kind, cell);
                    submission
                        .deploy
                        .extend(std::iter::repeat(placement).take(count as usize));
                }
                Command::Spawn { kind, cell, .. } => {
                    submission.build.push(Placement::new(catalog, kind, cell));
                }
                Command::Remove { cell } => {
                    submission
                        .build
                        .push(Placement::new(catalog, UnitKind::Remove, cell));
                }
                Command::BeginTurn { .. }
                | Command::SetResource { .. }
                | Command::PlaceStationary { .. } => {}
            }
        }
        submission
    }

    /// Stationary placements and removals, in request order.
    #[must_use]
    pub fn build(&self) -> &[Placement] {
        &self.build
    }

    /// Mobile deployments, one entry per unit.
    #[must_use]
    pub fn deploy(&self) -> &[Placement] {
        &self.deploy
    }

    /// Serializes the build and deploy lists as two JSON lines.
    pub fn to_lines(&self) -> Result<(String, String), serde_json::Error> {
        Ok((
            serde_json::to_string(&self.build)?,
            serde_json::to_string(&self.deploy)?,
        ))
    }
}
