use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible view of one cell.
///
/// Hidden information is masked: `has_hazard` is only reported for revealed
/// cells and `adjacent_hazards` only for revealed safe cells, both are `false`/`0`
/// otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub row: Coord,
    pub col: Coord,
    pub revealed: bool,
    pub flagged: bool,
    pub has_hazard: bool,
    pub adjacent_hazards: u8,
}

impl CellSnapshot {
    pub fn new((row, col): Coord2, cell: &Cell) -> Self {
        let revealed = cell.is_revealed();
        let has_hazard = revealed && cell.has_hazard();
        Self {
            row,
            col,
            revealed,
            flagged: cell.is_flagged(),
            has_hazard,
            adjacent_hazards: if revealed && !has_hazard {
                cell.adjacent_hazards()
            } else {
                0
            },
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Read-only view of the whole board, enough to render it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub outcome: Outcome,
    pub hazard_count: CellCount,
    pub flagged_count: CellCount,
    /// The "hazards left" counter, negative when over-flagged.
    pub hazards_left: i32,
    pub triggered_hazard: Option<Coord2>,
    pub cells: Array2<CellSnapshot>,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let grid = engine.grid();
        let cells = Array2::from_shape_fn(grid.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            CellSnapshot::new(coords, &grid[coords])
        });

        Self {
            size: grid.size(),
            outcome: engine.outcome(),
            hazard_count: engine.hazard_count(),
            flagged_count: engine.flagged_count(),
            hazards_left: engine.hazards_left(),
            triggered_hazard: engine.triggered_hazard(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&CellSnapshot> {
        self.cells.get(coords.to_nd_index())
    }
}
