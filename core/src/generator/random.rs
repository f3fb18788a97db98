use alloc::vec::Vec;

use rand::prelude::*;

use super::*;

/// Uniform placement without replacement, reproducible from a seed.
///
/// The generator keeps its random stream between games, so a sequence of
/// `initialize` calls is reproducible from the single starting seed.
#[derive(Clone, Debug)]
pub struct RandomHazardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomHazardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl HazardGenerator for RandomHazardGenerator {
    fn generate(&mut self, config: GameConfig) -> HazardLayout {
        let size = config.size();
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        // a shuffled prefix is a uniform random subset of the requested size
        let mut positions: Vec<Coord2> = (0..config.rows)
            .flat_map(|row| (0..config.cols).map(move |col| (row, col)))
            .collect();
        positions.shuffle(&mut self.rng);

        let wanted = usize::from(config.hazards);
        if wanted > positions.len() {
            log::warn!(
                "Requested {} hazards but the board only has {} cells",
                wanted,
                positions.len()
            );
        }
        for &coords in positions.iter().take(wanted) {
            hazard_mask[coords.to_nd_index()] = true;
        }

        let hazard_count = hazard_mask.iter().filter(|&&hazard| hazard).count() as CellCount;
        log::debug!(
            "Placed {} hazards on a {}x{} board (seed {})",
            hazard_count,
            config.rows,
            config.cols,
            self.seed
        );

        HazardLayout {
            hazard_mask,
            hazard_count,
        }
    }
}
