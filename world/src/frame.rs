//! Parsing of the JSON documents the host engine writes to standard input.
//!
//! The first line of a match carries the engine configuration, every later
//! line is a frame snapshot. Deploy-phase frames are mirrored into a fresh
//! [`World`] before the strategy runs.

use diamond_siege_core::{
    CellCoord, Command, Player, ResourceKind, UnitCatalog, UnitKind, UnitStats,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{apply, World};

/// Errors raised while decoding engine documents.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The document is not valid JSON for the expected shape.
    #[error("malformed engine document: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration lists fewer unit kinds than the engine defines.
    #[error("unit catalog lists {found} entries, expected at least {expected}")]
    IncompleteCatalog {
        /// Number of entries present.
        found: usize,
        /// Number of entries required.
        expected: usize,
    },
    /// The frame carries no `turnInfo` header.
    #[error("frame is missing its turn header")]
    MissingTurnInfo,
}

#[derive(Deserialize)]
struct EngineConfig {
    #[serde(rename = "unitInformation")]
    unit_information: Vec<UnitStats>,
}

/// Builds the unit catalog from the engine configuration line.
pub fn catalog_from_config(line: &str) -> Result<UnitCatalog, FrameError> {
    let config: EngineConfig = serde_json::from_str(line)?;
    let found = config.unit_information.len();
    UnitCatalog::from_entries(config.unit_information).ok_or(FrameError::IncompleteCatalog {
        found,
        expected: UnitKind::ALL.len(),
    })
}

/// Stage of the match a frame describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePhase {
    /// The engine waits for a submission.
    Deploy,
    /// Units are moving. No response is expected.
    Action,
    /// The match has ended.
    GameOver,
}

/// Unit entry as listed in a frame: `[x, y, health, id, ...]`.
#[derive(Debug, Deserialize)]
struct UnitEntry(Vec<Value>);

impl UnitEntry {
    fn cell(&self) -> Option<CellCoord> {
        let column = self.0.first()?.as_u64()?;
        let row = self.0.get(1)?.as_u64()?;
        Some(CellCoord::new(
            u32::try_from(column).ok()?,
            u32::try_from(row).ok()?,
        ))
    }
}

/// One frame snapshot reported by the host engine.
#[derive(Debug, Deserialize)]
pub struct TurnFrame {
    #[serde(rename = "turnInfo", default)]
    turn_info: Vec<i64>,
    #[serde(rename = "p1Units", default)]
    own_units: Vec<Vec<UnitEntry>>,
    #[serde(rename = "p2Units", default)]
    opponent_units: Vec<Vec<UnitEntry>>,
    #[serde(rename = "p1Stats", default)]
    own_stats: Vec<f32>,
    #[serde(rename = "p2Stats", default)]
    opponent_stats: Vec<f32>,
    #[serde(default)]
    events: Value,
}

impl TurnFrame {
    /// Decodes a frame line.
    pub fn parse(line: &str) -> Result<Self, FrameError> {
        let frame: Self = serde_json::from_str(line)?;
        if frame.turn_info.is_empty() {
            return Err(FrameError::MissingTurnInfo);
        }
        Ok(frame)
    }

    /// Stage reported by the frame header, `None` for unknown codes.
    #[must_use]
    pub fn phase(&self) -> Option<FramePhase> {
        match self.turn_info.first()? {
            0 => Some(FramePhase::Deploy),
            1 => Some(FramePhase::Action),
            2 => Some(FramePhase::GameOver),
            _ => None,
        }
    }

    /// Engine turn number, zero when absent or negative.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn_info
            .get(1)
            .and_then(|turn| u32::try_from(*turn).ok())
            .unwrap_or(0)
    }

    /// Raw `events` object of the frame.
    #[must_use]
    pub fn events(&self) -> &Value {
        &self.events
    }

    /// Mirrors the frame into a fresh world using the provided catalog.
    #[must_use]
    pub fn to_world(&self, catalog: &UnitCatalog) -> World {
        let mut world = World::with_catalog(catalog.clone());
        let mut events = Vec::new();
        apply(&mut world, Command::BeginTurn { turn: self.turn() }, &mut events);

        for (player, stats) in [
            (Player::Own, &self.own_stats),
            (Player::Opponent, &self.opponent_stats),
        ] {
            for (kind, index) in [(ResourceKind::Structure, 1), (ResourceKind::Mobile, 2)] {
                let amount = stats.get(index).copied().unwrap_or(0.0);
                apply(
                    &mut world,
                    Command::SetResource {
                        player,
                        kind,
                        amount,
                    },
                    &mut events,
                );
            }
        }

        for (owner, groups) in [
            (Player::Own, &self.own_units),
            (Player::Opponent, &self.opponent_units),
        ] {
            for (kind, entries) in UnitKind::ALL.into_iter().zip(groups) {
                if !kind.is_stationary() {
                    continue;
                }
                for cell in entries.iter().filter_map(UnitEntry::cell) {
                    apply(
                        &mut world,
                        Command::PlaceStationary { kind, owner, cell },
                        &mut events,
                    );
                }
            }
        }

        let dropped = events
            .iter()
            .filter(|event| matches!(event, diamond_siege_core::Event::SpawnRejected { .. }))
            .count();
        if dropped > 0 {
            tracing::warn!(dropped, turn = self.turn(), "frame listed unplaceable stationary units");
        }
        world
    }
}
