//! Line protocol spoken with the host engine over standard streams.

use std::io::{BufRead, Write};

use anyhow::Context;
use diamond_siege_core::UnitCatalog;
use diamond_siege_system_breach::parse_breach_events;
use diamond_siege_system_strategy::{Strategy, StrategyConfig};
use diamond_siege_world::{
    frame::{self, FramePhase, TurnFrame},
    query,
};

/// Whether the engine expects further lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Finished,
}

/// Match state built from the configuration line.
struct Match {
    catalog: UnitCatalog,
    strategy: Strategy,
}

/// Drives one match: the first line configures it, later lines are frames.
pub(crate) struct Session {
    config: StrategyConfig,
    seed: u64,
    active: Option<Match>,
    turns_played: u32,
}

impl Session {
    pub(crate) fn new(config: StrategyConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            active: None,
            turns_played: 0,
        }
    }

    pub(crate) fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Consumes one engine line, writing a submission for deploy frames.
    ///
    /// Only a broken configuration line or a failed write is an error. Bad
    /// frames are logged and skipped so later turns still get answered.
    pub(crate) fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(active) = self.active.as_mut() else {
            let catalog = frame::catalog_from_config(line)
                .context("failed to read engine configuration line")?;
            let strategy = Strategy::new(self.config.clone(), &catalog, self.seed);
            tracing::info!(seed = self.seed, "match configured");
            self.active = Some(Match { catalog, strategy });
            return Ok(Flow::Continue);
        };

        let frame = match TurnFrame::parse(line) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable frame");
                return Ok(Flow::Continue);
            }
        };

        match frame.phase() {
            Some(FramePhase::Deploy) => {
                let mut world = frame.to_world(&active.catalog);
                let _ = active.strategy.play_turn(&mut world, frame.turn());
                let (build, deploy) = query::submission(&world).to_lines().unwrap_or_else(|error| {
                    tracing::warn!(%error, "submission encoding failed, sending empty turn");
                    ("[]".to_owned(), "[]".to_owned())
                });
                writeln!(out, "{build}").context("failed to write build line")?;
                writeln!(out, "{deploy}").context("failed to write deploy line")?;
                out.flush().context("failed to flush submission")?;
                self.turns_played += 1;
            }
            Some(FramePhase::Action) => match parse_breach_events(line) {
                Ok(events) => {
                    let counted = active.strategy.observe_breaches(&events);
                    if counted > 0 {
                        tracing::debug!(turn = frame.turn(), counted, "breaches observed");
                    }
                }
                Err(error) => tracing::warn!(%error, "skipping unreadable breach feed"),
            },
            Some(FramePhase::GameOver) => {
                tracing::info!(turns = self.turns_played, "match finished");
                return Ok(Flow::Finished);
            }
            None => tracing::debug!("ignoring frame with unknown phase"),
        }
        Ok(Flow::Continue)
    }
}

/// Runs a whole match, returning the number of turns answered.
pub(crate) fn run<I, W>(input: I, out: &mut W, session: &mut Session) -> anyhow::Result<u32>
where
    I: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("failed to read from engine")?;
        if session.handle_line(&line, out)? == Flow::Finished {
            break;
        }
    }
    Ok(session.turns_played())
}
