use alloc::vec::Vec;
use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng, seq::index};

use super::*;

/// Uniform placement without replacement, optionally keeping a start cell and its neighbors clear.
///
/// The same seed and start always produce the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Option<Coord2>,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Option<Coord2>) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let size = config.size;
        let cols = usize::from(size.1);

        let forbidden = Placement::forbidden_zone(size, self.start);
        let eligible: Vec<usize> = forbidden
            .iter()
            .enumerate()
            .filter(|&(_, &blocked)| !blocked)
            .map(|(i, _)| i)
            .collect();

        let mut amount = config.mines as usize;
        if amount > eligible.len() {
            log::warn!(
                "Cannot keep start region clear, requested {} mines but only {} cells are eligible",
                amount,
                eligible.len()
            );
            amount = eligible.len();
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for pick in index::sample(&mut rng, eligible.len(), amount) {
            let i = eligible[pick];
            mine_mask[[i / cols, i % cols]] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{} board (seed: {}, start: {:?})",
            amount,
            size.0,
            size.1,
            self.seed,
            self.start
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
