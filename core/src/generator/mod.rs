use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// When mines get placed on a fresh board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Mines are placed when the board is constructed, anywhere on the board.
    Eager,
    /// Mines are placed on the first reveal, never on the revealed cell or its neighbors.
    #[default]
    SafeFirstClick,
}

impl Placement {
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::SafeFirstClick)
    }

    /// Largest mine count a board of `size` accepts under this policy.
    ///
    /// Safe-first-click reserves the worst case 3x3 block so the first reveal is always a zero, wherever it lands.
    pub const fn mine_capacity(self, size: Coord2) -> CellCount {
        let total = mult(size.0, size.1);
        match self {
            Self::Eager => total.saturating_sub(1),
            Self::SafeFirstClick => total.saturating_sub(safe_zone_area(size)),
        }
    }

    /// Mask of the cells that must stay mine free for a first reveal at `start`.
    ///
    /// Covers `start` and its neighbors clipped to the board; empty without a start
    /// or when `start` is off the board.
    pub fn forbidden_zone(size: Coord2, start: Option<Coord2>) -> Array2<bool> {
        let mut zone: Array2<bool> = Array2::default(size.to_nd_index());
        if let Some(start) = start.filter(|&(row, col)| row < size.0 && col < size.1) {
            zone[start.to_nd_index()] = true;
            for pos in zone.iter_neighbors(start) {
                zone[pos.to_nd_index()] = true;
            }
        }
        zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eager_capacity_leaves_one_safe_cell() {
        assert_eq!(Placement::Eager.mine_capacity((9, 9)), 80);
        assert_eq!(Placement::Eager.mine_capacity((1, 1)), 0);
    }

    #[test]
    fn safe_first_click_capacity_reserves_start_block() {
        assert_eq!(Placement::SafeFirstClick.mine_capacity((9, 9)), 72);
        assert_eq!(Placement::SafeFirstClick.mine_capacity((16, 30)), 471);
        assert_eq!(Placement::SafeFirstClick.mine_capacity((1, 2)), 0);
        assert_eq!(Placement::SafeFirstClick.mine_capacity((2, 4)), 2);
    }

    fn zone_cells(zone: &Array2<bool>) -> usize {
        zone.iter().filter(|&&blocked| blocked).count()
    }

    #[test]
    fn forbidden_zone_covers_start_and_neighbors() {
        let zone = Placement::forbidden_zone((9, 9), Some((4, 4)));
        assert_eq!(zone_cells(&zone), 9);
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(zone[[row, col]]);
            }
        }
        assert!(!zone[[2, 4]]);
        assert!(!zone[[4, 6]]);

        let corner = Placement::forbidden_zone((9, 9), Some((8, 0)));
        assert_eq!(zone_cells(&corner), 4);
        assert!(corner[[7, 1]]);

        let edge = Placement::forbidden_zone((1, 5), Some((0, 2)));
        assert_eq!(zone_cells(&edge), 3);
    }

    #[test]
    fn forbidden_zone_is_empty_without_a_start() {
        assert_eq!(zone_cells(&Placement::forbidden_zone((9, 9), None)), 0);
        assert_eq!(zone_cells(&Placement::forbidden_zone((9, 9), Some((9, 0)))), 0);
        assert_eq!(Placement::forbidden_zone((2, 3), None).dim(), (2, 3));
    }

    #[test]
    fn worst_case_zone_matches_reserved_capacity() {
        for size in [(1, 1), (1, 2), (2, 4), (3, 3), (9, 9), (16, 30)] {
            let largest = (0..size.0)
                .flat_map(|row| (0..size.1).map(move |col| (row, col)))
                .map(|start| zone_cells(&Placement::forbidden_zone(size, Some(start))))
                .max()
                .unwrap();
            assert_eq!(largest as CellCount, safe_zone_area(size), "{size:?}");
        }
    }
}
