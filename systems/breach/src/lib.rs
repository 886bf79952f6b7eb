#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rolling history of the edge breaches suffered by the own player.
//!
//! Breach events arrive through many action frames between two deploy turns.
//! They accumulate into a pending per-turn record which is sealed into a
//! bounded FIFO history exactly once per turn. The lane bias derived from that
//! history steers which half of the board receives extra attention.

mod feed;

use std::collections::VecDeque;

use diamond_siege_core::{CellCoord, Lane, HALF_ARENA};
use serde::{Deserialize, Serialize};

pub use feed::{parse_breach_events, FeedError};

/// Tuning for the breach history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachConfig {
    /// Maximum number of sealed turn records retained.
    pub capacity: usize,
    /// Highest column counted as the left half.
    pub midline_column: u32,
}

impl BreachConfig {
    /// Largest history a configuration may request.
    pub const MAX_CAPACITY: usize = 1024;
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            midline_column: HALF_ARENA - 1,
        }
    }
}

/// Breaches absorbed on each half of the board during one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreachRecord {
    /// Breaches at or left of the midline.
    pub left: u32,
    /// Breaches right of the midline.
    pub right: u32,
}

impl BreachRecord {
    fn bump(&mut self, lane: Lane) {
        let counter = match lane {
            Lane::Left => &mut self.left,
            Lane::Right => &mut self.right,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total breaches counted in the record.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.left.saturating_add(self.right)
    }
}

/// One breach reported by the action-frame feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachEvent {
    /// Edge cell the mobile unit reached.
    pub cell: CellCoord,
    /// Whether the breach damaged the own player.
    pub inbound_to_self: bool,
}

/// Bounded breach history plus the record of the turn in progress.
#[derive(Clone, Debug)]
pub struct BreachTracker {
    config: BreachConfig,
    history: VecDeque<BreachRecord>,
    pending: BreachRecord,
    last_sealed: Option<u32>,
}

impl BreachTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new(config: BreachConfig) -> Self {
        Self {
            config,
            history: VecDeque::with_capacity(config.capacity.min(BreachConfig::MAX_CAPACITY)),
            pending: BreachRecord::default(),
            last_sealed: None,
        }
    }

    /// Tuning the tracker was created with.
    #[must_use]
    pub fn config(&self) -> BreachConfig {
        self.config
    }

    /// Counts a breach into the pending record when it damaged the own player.
    ///
    /// Returns whether the event was counted.
    pub fn record_breach_event(&mut self, cell: CellCoord, inbound_to_self: bool) -> bool {
        if !inbound_to_self {
            return false;
        }

        let lane = Lane::of_column(cell.column(), self.config.midline_column);
        self.pending.bump(lane);
        tracing::debug!(?cell, ?lane, "breach recorded");
        true
    }

    /// Counts every event of one action frame. Returns how many were counted.
    pub fn observe(&mut self, events: &[BreachEvent]) -> usize {
        events
            .iter()
            .filter(|event| self.record_breach_event(event.cell, event.inbound_to_self))
            .count()
    }

    /// Appends the pending record to the history as the record of `turn`.
    ///
    /// Each turn seals at most once: a repeated or older turn number leaves
    /// the history untouched and returns `None`. The oldest record is evicted
    /// once the history exceeds its capacity.
    pub fn seal_turn(&mut self, turn: u32) -> Option<BreachRecord> {
        if self.last_sealed.is_some_and(|sealed| turn <= sealed) {
            tracing::debug!(turn, last_sealed = ?self.last_sealed, "breach record already sealed");
            return None;
        }

        let record = std::mem::take(&mut self.pending);
        self.history.push_back(record);
        while self.history.len() > self.config.capacity {
            let _ = self.history.pop_front();
        }
        self.last_sealed = Some(turn);
        Some(record)
    }

    /// Whether the left half has taken at least as many sealed breaches as
    /// the right half. Pending events do not count until sealed.
    #[must_use]
    pub fn current_bias(&self) -> bool {
        let (left, right) = self
            .history
            .iter()
            .fold((0_u64, 0_u64), |(left, right), record| {
                (left + u64::from(record.left), right + u64::from(record.right))
            });
        left >= right
    }

    /// Lane favoured by [`Self::current_bias`].
    #[must_use]
    pub fn lane(&self) -> Lane {
        if self.current_bias() {
            Lane::Left
        } else {
            Lane::Right
        }
    }

    /// Sealed records, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &BreachRecord> + '_ {
        self.history.iter()
    }

    /// Record of the turn still accumulating.
    #[must_use]
    pub fn pending(&self) -> BreachRecord {
        self.pending
    }
}

impl Default for BreachTracker {
    fn default() -> Self {
        Self::new(BreachConfig::default())
    }
}
