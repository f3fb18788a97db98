use alloc::collections::VecDeque;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Ongoing -> Won
/// - Ongoing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Ongoing,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }

    /// The game has ended and no moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a move did: the outcome after it and every cell whose visible state changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub outcome: Outcome,
    pub changed: Vec<CellSnapshot>,
}

impl MoveResult {
    /// Whether the caller has anything to redraw.
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// A single game from the first reveal to a win or loss.
///
/// Moves that do not apply (out of bounds, finished game, flagged or revealed
/// target) are silent no-ops returning an empty [`MoveResult`].
#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    grid: Grid,
    hazard_count: CellCount,
    hidden_safe_count: CellCount,
    flagged_count: CellCount,
    outcome: Outcome,
    triggered_hazard: Option<Coord2>,
}

impl GameEngine {
    /// Starts a game with hazards placed by `generator`.
    pub fn new(config: GameConfig, generator: &mut impl HazardGenerator) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(config);
        log::debug!(
            "New game {}x{} with {} hazards",
            config.rows,
            config.cols,
            layout.hazard_count()
        );
        Ok(Self::from_layout(layout))
    }

    /// Starts a game on a known layout.
    pub fn from_layout(layout: HazardLayout) -> Self {
        let grid = Grid::from_layout(&layout);
        Self {
            hazard_count: grid.count(Cell::has_hazard),
            hidden_safe_count: grid.count(|cell| !cell.has_hazard()),
            grid,
            flagged_count: 0,
            outcome: Outcome::Ongoing,
            triggered_hazard: None,
        }
    }

    /// Throws away the current game and starts a fresh one.
    ///
    /// On error the current game is left as it was.
    pub fn initialize(
        &mut self,
        config: GameConfig,
        generator: &mut impl HazardGenerator,
    ) -> Result<()> {
        *self = Self::new(config, generator)?;
        Ok(())
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many hazards have not been flagged yet, negative when over-flagged.
    pub fn hazards_left(&self) -> i32 {
        i32::from(self.hazard_count) - i32::from(self.flagged_count)
    }

    /// Safe cells still to be revealed, the game is won when this reaches zero.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.hidden_safe_count
    }

    /// The hazard whose reveal lost the game.
    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.get(coords)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }

    /// Whether `chord_reveal` at `coords` would act: a revealed numbered cell
    /// with exactly as many flagged neighbours as its count.
    pub fn is_chordable(&self, coords: Coord2) -> bool {
        if self.outcome.is_finished() {
            return false;
        }

        match self.grid.get(coords) {
            Some(cell) if cell.is_revealed() && cell.adjacent_hazards() > 0 => {
                self.grid.count_neighbors(coords, Cell::is_flagged) == cell.adjacent_hazards()
            }
            _ => false,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MoveResult {
        if self.outcome.is_finished() {
            return self.move_result(Vec::new());
        }

        let Some(cell) = self.grid.get_mut(coords) else {
            return self.move_result(Vec::new());
        };
        if cell.is_revealed() {
            return self.move_result(Vec::new());
        }

        if cell.toggle_flag() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("Toggled flag at {:?}, {} flagged", coords, self.flagged_count);
        self.move_result(Vec::from([coords]))
    }

    /// Reveal a hidden cell, flood-filling from it when it has no hazard neighbours.
    pub fn reveal(&mut self, coords: Coord2) -> MoveResult {
        let mut changed = Vec::new();
        if self.can_reveal(coords) {
            self.reveal_cell(coords, &mut changed);
        }
        self.move_result(changed)
    }

    /// Reveal every hidden, unflagged neighbour of a satisfied numbered cell.
    pub fn chord_reveal(&mut self, coords: Coord2) -> MoveResult {
        let mut changed = Vec::new();
        if self.is_chordable(coords) {
            let targets: SmallVec<[Coord2; 8]> = self
                .grid
                .iter_neighbors(coords)
                .filter(|&pos| self.grid[pos].is_hidden())
                .collect();
            log::debug!("Chord at {:?} opens {} neighbours", coords, targets.len());

            for pos in targets {
                // an earlier neighbour may have flood-filled over this one or ended the game
                if self.can_reveal(pos) {
                    self.reveal_cell(pos, &mut changed);
                }
            }
        }
        self.move_result(changed)
    }

    fn can_reveal(&self, coords: Coord2) -> bool {
        self.outcome.is_ongoing() && self.grid.get(coords).is_some_and(Cell::is_hidden)
    }

    /// Reveals a cell already checked with `can_reveal`, then settles win or loss.
    fn reveal_cell(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) {
        let cell = &mut self.grid[coords];
        cell.reveal();
        changed.push(coords);

        if cell.has_hazard() {
            log::debug!("Hazard revealed at {:?}, game lost", coords);
            self.triggered_hazard = Some(coords);
            self.finish(Outcome::Lost, changed);
            return;
        }

        self.hidden_safe_count -= 1;
        log::trace!("Revealed {:?}, count {}", coords, cell.adjacent_hazards());
        if cell.adjacent_hazards() == 0 {
            self.flood_fill(coords, changed);
        }

        if self.hidden_safe_count == 0 {
            log::debug!("Every safe cell revealed, game won");
            self.finish(Outcome::Won, changed);
        }
    }

    /// Opens the zero region around `start` and the numbered cells bordering it.
    fn flood_fill(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.grid.iter_neighbors(visit_coords) {
                let neighbor = &mut self.grid[pos];
                if neighbor.is_revealed() || neighbor.has_hazard() {
                    continue;
                }

                // a flag on a safe cell does not stop the flood
                if neighbor.is_flagged() {
                    self.flagged_count -= 1;
                }
                neighbor.reveal();
                self.hidden_safe_count -= 1;
                changed.push(pos);
                log::trace!("Flood opened {:?}, count {}", pos, neighbor.adjacent_hazards());

                if neighbor.adjacent_hazards() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Ends the game and reveals the whole board.
    fn finish(&mut self, outcome: Outcome, changed: &mut Vec<Coord2>) {
        if self.outcome.is_finished() {
            return;
        }
        self.outcome = outcome;

        for (coords, cell) in self.grid.iter_mut() {
            let was_flagged = cell.is_flagged();
            if cell.reveal() {
                changed.push(coords);
                if was_flagged {
                    self.flagged_count -= 1;
                }
                if !cell.has_hazard() {
                    self.hidden_safe_count -= 1;
                }
            }
        }
    }

    fn move_result(&self, changed: Vec<Coord2>) -> MoveResult {
        MoveResult {
            outcome: self.outcome,
            changed: changed
                .into_iter()
                .map(|coords| CellSnapshot::new(coords, &self.grid[coords]))
                .collect(),
        }
    }
}
