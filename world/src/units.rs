//! Dense storage for the stationary units placed in the arena.

use diamond_siege_core::{CellCoord, StationaryUnit, ARENA_SIZE};

/// Row-major grid holding at most one stationary unit per arena cell.
///
/// Cells outside the diamond are never written so iteration yields only
/// units that the world accepted.
#[derive(Clone, Debug)]
pub(crate) struct StationaryGrid {
    cells: Vec<Option<StationaryUnit>>,
}

impl StationaryGrid {
    /// Creates an empty grid spanning the full arena square.
    pub(crate) fn new() -> Self {
        let side = usize::try_from(ARENA_SIZE).unwrap_or(0);
        Self {
            cells: vec![None; side * side],
        }
    }

    /// Unit stored at the provided cell, if any.
    pub(crate) fn unit_at(&self, cell: CellCoord) -> Option<&StationaryUnit> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Reports whether a unit occupies the provided cell.
    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.unit_at(cell).is_some()
    }

    /// Stores the unit at its own cell. Returns `false` when the cell is
    /// outside the arena or already taken.
    pub(crate) fn place(&mut self, unit: StationaryUnit) -> bool {
        let Some(index) = self.index(unit.cell) else {
            return false;
        };
        let Some(slot) = self.cells.get_mut(index) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(unit);
        true
    }

    /// Removes and returns the unit stored at the provided cell.
    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<StationaryUnit> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Iterates over stored units in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &StationaryUnit> + '_ {
        self.cells.iter().filter_map(Option::as_ref)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !cell.in_arena() {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(ARENA_SIZE).ok()?;
        Some(row * width + column)
    }
}
