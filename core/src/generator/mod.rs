use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Produces hazard placements for a new game.
///
/// The config handed to `generate` has already been validated, so a generator
/// can rely on `hazards < rows * cols`.
pub trait HazardGenerator {
    fn generate(&mut self, config: GameConfig) -> HazardLayout;
}

/// Which cells hold a hazard, fixed for the lifetime of a game.
///
/// On the wire a layout is just its mask. Deserializing goes through
/// [`HazardLayout::from_hazard_mask`], so the count is always recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct HazardLayout {
    hazard_mask: Array2<bool>,
    hazard_count: CellCount,
}

impl HazardLayout {
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = hazard_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::InvalidCoords);
        };
        let hazards = hazard_mask.iter().filter(|&&hazard| hazard).count() as CellCount;
        GameConfig::new(rows, cols, hazards)?;

        Ok(Self {
            hazard_mask,
            hazard_count: hazards,
        })
    }

    /// Builds a layout from explicit `(row, col)` hazard positions, duplicates count once.
    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.hazard_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.hazard_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn contains_hazard(&self, coords: Coord2) -> bool {
        self.hazard_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn adjacent_hazard_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl TryFrom<Array2<bool>> for HazardLayout {
    type Error = GameError;

    fn try_from(hazard_mask: Array2<bool>) -> Result<Self> {
        Self::from_hazard_mask(hazard_mask)
    }
}

impl From<HazardLayout> for Array2<bool> {
    fn from(layout: HazardLayout) -> Self {
        layout.hazard_mask
    }
}

impl Index<Coord2> for HazardLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.hazard_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_coords_build_layout() {
        let layout = HazardLayout::from_hazard_coords((3, 4), &[(0, 0), (2, 3), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (3, 4));
        assert_eq!(layout.hazard_count(), 2);
        assert!(layout[(2, 3)]);
        assert!(!layout.contains_hazard((1, 1)));
        assert!(!layout.contains_hazard((9, 9)));
        assert_eq!(layout.adjacent_hazard_count((1, 1)), 1);
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(3, 4, 2));
    }

    #[test]
    fn rejects_out_of_bounds_hazard() {
        assert_eq!(
            HazardLayout::from_hazard_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_layout_without_safe_cell() {
        let result = HazardLayout::from_hazard_coords((1, 2), &[(0, 0), (0, 1)]);

        assert!(matches!(
            result,
            Err(GameError::InvalidConfiguration(ConfigError::TooManyHazards { .. }))
        ));
    }

    #[test]
    fn rejects_empty_mask() {
        let result = HazardLayout::from_hazard_mask(Array2::default([0, 3]));

        assert!(matches!(
            result,
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard { .. }))
        ));
    }

    #[test]
    fn serde_goes_through_mask_validation() {
        let layout = HazardLayout::from_hazard_coords((2, 2), &[(0, 1)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let back: HazardLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
        assert_eq!(back.hazard_count(), 1);

        // no safe cell left
        let full = r#"{"v":1,"dim":[1,2],"data":[true,true]}"#;
        assert!(serde_json::from_str::<HazardLayout>(full).is_err());
    }

    #[test]
    fn serde_rejects_stored_hazard_count() {
        let forged = r#"{"hazard_mask":{"v":1,"dim":[2,2],"data":[true,false,false,false]},"hazard_count":3}"#;

        assert!(serde_json::from_str::<HazardLayout>(forged).is_err());
    }
}
