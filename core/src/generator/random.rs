use super::*;
use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng, seq::index};

/// Uniform placement: `mines` distinct flattened indices sampled without replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validate()?;

        let mut mine_mask: Array2<bool> = Array2::default(config.shape());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for flat_index in index::sample(
            &mut rng,
            usize::from(config.total_cells()),
            usize::from(config.mines),
        ) {
            mine_mask[Position::from_flat_index(flat_index, config.width).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            config.width,
            config.height,
            layout.mine_count(),
            self.seed
        );
        Ok(layout)
    }
}
