use core::ops::BitOr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the grid of cells, where the mines are and how far the player got.
///
/// Commands never fail, anything that cannot apply (coordinates outside the board, a finished game, a flagged
/// target, ...) comes back as a `NoChange` outcome and leaves the board untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    placement: Placement,
    seed: u64,
    grid: Array2<Cell>,
    mines_placed: bool,
    state: BoardState,
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates a board with random mines drawn from `seed`.
    ///
    /// Eager boards get their mines right away, safe-first-click boards on the first reveal.
    pub fn new(config: GameConfig, placement: Placement, seed: u64) -> Result<Self> {
        let config = config.validate(placement)?;
        let mut board = Self::empty(config, placement, seed);
        if !placement.is_deferred() {
            board.place_mines(None);
        }
        Ok(board)
    }

    /// Creates an eager board with a fixed mine layout.
    pub fn from_layout(layout: &MineLayout) -> Result<Self> {
        let config = layout.game_config().validate(Placement::Eager)?;
        let mut board = Self::empty(config, Placement::Eager, 0);
        board.apply_layout(layout);
        Ok(board)
    }

    fn empty(config: GameConfig, placement: Placement, seed: u64) -> Self {
        Self {
            config,
            placement,
            seed,
            grid: Array2::default(config.size.to_nd_index()),
            mines_placed: false,
            state: Default::default(),
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_victory(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    /// First mine revealed in a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, never below zero.
    pub fn remaining_mine_estimate(&self) -> CellCount {
        self.config.mines.saturating_sub(self.flagged_count)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cell(coords).map(|cell| self.view_of(cell))
    }

    /// Snapshot of every cell as the player sees it, indexed `[row, col]`.
    pub fn view(&self) -> Array2<CellView> {
        self.grid.map(|&cell| self.view_of(cell))
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell(coords) else {
            return RevealOutcome::NoChange;
        };

        if self.state.is_finished() || cell.is_settled() {
            return RevealOutcome::NoChange;
        }

        if !self.mines_placed {
            self.place_mines(Some(coords));
        }

        let outcome = self.open_cell(coords);
        self.settle(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_finished() || !self.contains(coords) {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.grid[coords.to_nd_index()];
        if cell.revealed {
            return MarkOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Opens every unflagged neighbor of a revealed number whose flag count matches it.
    ///
    /// Hitting a mine does not stop the chord, the rest of the neighborhood still opens.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(cell) = self.cell(coords) else {
            return RevealOutcome::NoChange;
        };

        if self.state.is_finished() || !cell.revealed {
            return RevealOutcome::NoChange;
        }

        let Some(count) = cell.adjacent_mines().filter(|&count| count > 0) else {
            return RevealOutcome::NoChange;
        };

        if self.count_flagged_neighbors(coords) != count {
            return RevealOutcome::NoChange;
        }

        let outcome = self
            .grid
            .iter_neighbors(coords)
            .map(|pos| {
                if self.grid[pos.to_nd_index()].is_settled() {
                    RevealOutcome::NoChange
                } else {
                    self.open_cell(pos)
                }
            })
            .fold(RevealOutcome::NoChange, BitOr::bitor);

        self.settle(outcome)
    }

    fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.grid.get(coords.to_nd_index()).copied()
    }

    fn view_of(&self, cell: Cell) -> CellView {
        use BoardState::*;
        use CellView::*;

        match (cell.revealed, cell.flagged, cell.mine, self.state) {
            (true, _, true, _) => Exploded,
            (true, _, false, _) => Revealed(cell.adjacent),
            (false, true, false, Won | Lost) => IncorrectFlag,
            (false, true, _, _) => Flagged,
            (false, false, true, Lost) => Mine,
            (false, false, true, Won) => AutoFlag,
            (false, false, _, _) => Hidden,
        }
    }

    fn place_mines(&mut self, start: Option<Coord2>) {
        let layout = RandomMinefieldGenerator::new(self.seed, start).generate(self.config);
        self.apply_layout(&layout);
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        self.grid
            .zip_mut_with(layout.mine_mask(), |cell, &mine| cell.mine = mine);
        self.config.mines = layout.mine_count();
        self.compute_adjacency();
        self.mines_placed = true;
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.grid[coords.to_nd_index()].mine {
                    continue;
                }

                let adjacent = self
                    .grid
                    .iter_neighbors(coords)
                    .filter(|&pos| self.grid[pos.to_nd_index()].mine)
                    .count() as u8;
                self.grid[coords.to_nd_index()].adjacent = adjacent;
            }
        }
    }

    /// Reveals a single hidden cell, flooding outwards from zeros.
    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.grid[coords.to_nd_index()];
        cell.revealed = true;
        let (mine, adjacent) = (cell.mine, cell.adjacent);

        if mine {
            self.triggered_mine.get_or_insert(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        self.revealed_count += 1;
        log::trace!("Revealed cell at {:?}, mine count: {}", coords, adjacent);

        if adjacent == 0 {
            self.flood_fill(coords);
        }
        RevealOutcome::Revealed
    }

    fn flood_fill(&mut self, start: Coord2) {
        let mut stack = alloc::vec![start];

        while let Some(current) = stack.pop() {
            for pos in self.grid.iter_neighbors(current) {
                let neighbor = &mut self.grid[pos.to_nd_index()];

                // flags stop the flood even inside a zero region
                if neighbor.is_settled() || neighbor.mine {
                    continue;
                }

                neighbor.revealed = true;
                self.revealed_count += 1;
                log::trace!("Flood revealed cell at {:?}, mine count: {}", pos, neighbor.adjacent);

                if neighbor.adjacent == 0 {
                    stack.push(pos);
                }
            }
        }
    }

    /// Applies the win condition after cells were opened.
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if !outcome.has_update() || self.state.is_finished() {
            return outcome;
        }

        if self.revealed_count == self.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            outcome
        }
    }

    fn safe_cell_count(&self) -> CellCount {
        self.config.total_cells() - self.config.mines
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        log::debug!(
            "Game over ({:?}) with {} of {} safe cells revealed",
            self.state,
            self.revealed_count,
            self.safe_cell_count()
        );
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos.to_nd_index()].flagged)
            .count() as u8
    }
}
