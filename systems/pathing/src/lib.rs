#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic path projection for mobile units crossing the arena.
//!
//! A mobile unit launched from one edge walks toward the opposite edge using
//! the engine's greedy movement rule: straight ahead when possible, otherwise
//! the lateral step toward the target side, otherwise the other lateral step.
//! Stationary units block cells and a unit never revisits a cell, so a boxed-in
//! unit stops where it stands instead of failing.

use diamond_siege_core::{CellCoord, Direction, Edge, StationaryLayout, ARENA_SIZE};

/// Why a projection stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// The final cell lies on the target edge.
    ReachedEdge(Edge),
    /// No legal forward move remained before the target edge.
    DeadEnd,
    /// The launch cell lies on no edge, so no target could be derived.
    OffEdgeLaunch,
}

/// Ordered cells a mobile unit is predicted to traverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathProjection {
    cells: Vec<CellCoord>,
    outcome: PathOutcome,
}

impl PathProjection {
    /// Traversal-ordered cells, starting with the launch cell.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Reason the walk ended.
    #[must_use]
    pub fn outcome(&self) -> PathOutcome {
        self.outcome
    }

    /// Launch cell of the projection.
    #[must_use]
    pub fn launch(&self) -> CellCoord {
        self.cells[0]
    }

    /// Last reachable cell of the projection.
    #[must_use]
    pub fn destination(&self) -> CellCoord {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves taken, one less than the number of cells.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// Consumes the projection, yielding the owned cell sequence.
    #[must_use]
    pub fn into_cells(self) -> Vec<CellCoord> {
        self.cells
    }
}

/// Projects the path of a mobile unit launched from `launch`.
///
/// Convenience wrapper around [`PathProjector::project`] for one-off calls.
#[must_use]
pub fn project_path<L>(launch: CellCoord, layout: &L) -> PathProjection
where
    L: StationaryLayout + ?Sized,
{
    PathProjector::default().project(launch, layout)
}

/// Path projector that reuses its visited-cell workspace between calls.
#[derive(Debug, Default)]
pub struct PathProjector {
    visited: Vec<bool>,
}

impl PathProjector {
    /// Projects the path of a mobile unit launched from `launch` against the
    /// current stationary layout.
    ///
    /// The result always starts with `launch`. The walk is bounded by the
    /// number of arena cells because no cell is entered twice.
    pub fn project<L>(&mut self, launch: CellCoord, layout: &L) -> PathProjection
    where
        L: StationaryLayout + ?Sized,
    {
        let mut cells = vec![launch];
        let Some(target) = Edge::of(launch).map(Edge::opposite) else {
            return PathProjection {
                cells,
                outcome: PathOutcome::OffEdgeLaunch,
            };
        };

        self.reset();
        self.mark(launch);

        let priorities = movement_priorities(target);
        let mut current = launch;
        loop {
            if target.contains(current) {
                return PathProjection {
                    cells,
                    outcome: PathOutcome::ReachedEdge(target),
                };
            }

            let next = priorities
                .iter()
                .filter_map(|direction| current.step(*direction))
                .find(|candidate| {
                    candidate.in_arena()
                        && !self.is_visited(*candidate)
                        && !layout.contains_stationary_unit(*candidate)
                });

            let Some(next) = next else {
                return PathProjection {
                    cells,
                    outcome: PathOutcome::DeadEnd,
                };
            };

            self.mark(next);
            cells.push(next);
            current = next;
        }
    }

    fn reset(&mut self) {
        let side = ARENA_SIZE as usize;
        self.visited.clear();
        self.visited.resize(side * side, false);
    }

    fn mark(&mut self, cell: CellCoord) {
        if let Some(slot) = visited_index(cell).and_then(|index| self.visited.get_mut(index)) {
            *slot = true;
        }
    }

    fn is_visited(&self, cell: CellCoord) -> bool {
        visited_index(cell)
            .and_then(|index| self.visited.get(index))
            .copied()
            .unwrap_or(true)
    }
}

fn movement_priorities(target: Edge) -> [Direction; 3] {
    let lateral = target.lateral();
    [target.straight_ahead(), lateral, lateral.reversed()]
}

fn visited_index(cell: CellCoord) -> Option<usize> {
    if !cell.in_arena() {
        return None;
    }
    let side = ARENA_SIZE as usize;
    Some(cell.row() as usize * side + cell.column() as usize)
}
