//! Board-state engine for a single-player grid-clearing puzzle.
//!
//! A [`GameEngine`] owns one game: hazards placed by a [`HazardGenerator`],
//! adjacency counts, reveal with flood-fill, flags, chord reveal, and win/loss
//! detection. Every move returns a [`MoveResult`] listing the cells a renderer
//! has to redraw.
//!
//! ```
//! use sweeper_core::*;
//!
//! let mut generator = RandomHazardGenerator::new(42);
//! let mut engine = GameEngine::new(Difficulty::Beginner.config(), &mut generator)?;
//!
//! let result = engine.reveal((0, 0));
//! assert!(result.has_update());
//! # Ok::<(), GameError>(())
//! ```
#![no_std]

extern crate alloc;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;
