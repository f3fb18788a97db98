use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// A validated board shape and hazard count.
///
/// Rows and columns are [`Coord`] (`u8`), so a board is at most 255x255.
///
/// Fields are public so the settings layer can deserialize a config directly,
/// [`GameEngine::initialize`] validates again before using it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub hazards: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, hazards: CellCount) -> Self {
        Self {
            rows,
            cols,
            hazards,
        }
    }

    pub fn new(rows: Coord, cols: Coord, hazards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, hazards);
        config.validate()?;
        Ok(config)
    }

    /// Requires a non-empty board with at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }

        let cells = self.total_cells();
        if self.hazards >= cells {
            return Err(ConfigError::TooManyHazards {
                hazards: self.hazards,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Named presets offered by the difficulty picker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked(8, 8, 10),
            Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Expert => GameConfig::new_unchecked(16, 30, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()), "{difficulty}");
        }
        assert_eq!(Difficulty::Expert.config().size(), (16, 30));
        assert_eq!(Difficulty::Expert.config().hazards, 99);
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            GameConfig::new(0, 5, 0),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard {
                rows: 0,
                cols: 5
            }))
        );
        assert!(GameConfig::new(5, 0, 0).is_err());
    }

    #[test]
    fn rejects_full_board() {
        assert_eq!(
            GameConfig::new(2, 2, 4),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyHazards {
                hazards: 4,
                cells: 4
            }))
        );
        assert!(GameConfig::new(2, 2, 3).is_ok());
    }

    #[test]
    fn accepts_hazard_free_single_cell() {
        let config = GameConfig::new(1, 1, 0).unwrap();
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn parses_difficulty_names() {
        assert_eq!("beginner".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert_eq!(" Expert ".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!("nightmare".parse::<Difficulty>(), Err(GameError::UnknownDifficulty));
    }

    #[test]
    fn config_deserializes_from_settings() {
        let config: GameConfig =
            serde_json::from_str(r#"{"rows":9,"cols":9,"hazards":10}"#).unwrap();
        assert_eq!(config, GameConfig::new_unchecked(9, 9, 10));

        let difficulty: Difficulty = serde_json::from_str(r#""intermediate""#).unwrap();
        assert_eq!(GameConfig::from(difficulty), GameConfig::new_unchecked(16, 16, 40));
    }
}
