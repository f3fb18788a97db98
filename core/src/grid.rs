use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One board position, with everything the engine knows about it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_hazard: bool,
    revealed: bool,
    flagged: bool,
    adjacent_hazards: u8,
}

impl Cell {
    pub const fn has_hazard(&self) -> bool {
        self.has_hazard
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Number of hazards among the in-bounds neighbours, zero for hazard cells.
    pub const fn adjacent_hazards(&self) -> u8 {
        self.adjacent_hazards
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Marks the cell revealed, dropping any flag. Returns whether it changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.flagged = false;
        true
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.flagged = !self.flagged;
        self.flagged
    }
}

/// Fixed-size store of cells indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds an untouched grid with hazards placed and adjacency counts computed.
    pub fn from_layout(layout: &HazardLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let has_hazard = layout.contains_hazard(coords);
            Cell {
                has_hazard,
                adjacent_hazards: if has_hazard {
                    0
                } else {
                    layout.adjacent_hazard_count(coords)
                },
                ..Default::default()
            }
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Counts the neighbours of `coords` matching `predicate`.
    pub fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| predicate(&self[pos]))
            .count() as u8
    }

    /// Row-major iteration over every cell with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Coord2, &mut Cell)> {
        self.cells
            .indexed_iter_mut()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
