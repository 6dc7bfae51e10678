use alloc::vec::Vec;

use super::*;

/// Places mines uniformly at random, without replacement, from a seeded generator.
///
/// The same seed and config always produce the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        config.validate()?;

        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);
        log::debug!(
            "Generating {}x{} minefield with {} mines, seed {}",
            config.size.0,
            config.size.1,
            mines,
            self.seed
        );

        // partial Fisher-Yates: the first `mines` slots end up as a uniform sample
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cells: Vec<usize> = (0..total_cells).collect();
        for i in 0..mines {
            let j = rng.random_range(i..total_cells);
            cells.swap(i, j);
        }
        cells.truncate(mines);

        MineLayout::from_mine_indices(config.size, &cells)
    }
}
