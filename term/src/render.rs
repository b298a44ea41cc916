use std::fmt;
use std::time::Duration;

use sweeper_core::{Board, BoardState, CellView};

const MAX_TIMER_SECS: u64 = 999;

fn symbol(cell: CellView) -> char {
    use CellView::*;
    match cell {
        Hidden => '#',
        Flagged | AutoFlag => 'F',
        Revealed(0) => '.',
        Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Exploded => '@',
        Mine => '*',
        IncorrectFlag => 'X',
    }
}

fn face(state: BoardState) -> &'static str {
    match state {
        BoardState::Won => "B)",
        BoardState::Lost => ":(",
        BoardState::Ready | BoardState::Active => ":)",
    }
}

fn digits(value: u16) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Status line and grid for one frame, rows and columns labelled from 1.
pub struct Screen<'a> {
    board: &'a Board,
    elapsed: Duration,
}

impl<'a> Screen<'a> {
    pub fn new(board: &'a Board, elapsed: Duration) -> Self {
        Self { board, elapsed }
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        let (rows, cols) = board.size();
        let row_width = digits(rows);
        let col_width = digits(cols);

        writeln!(
            f,
            "Mines: {:>3}  {}  Time: {:>3}",
            board.remaining_mine_estimate(),
            face(board.state()),
            self.elapsed.as_secs().min(MAX_TIMER_SECS)
        )?;

        write!(f, "{:row_width$} ", "")?;
        for col in 1..=cols {
            write!(f, " {col:>col_width$}")?;
        }
        writeln!(f)?;

        for (row, cells) in board.view().outer_iter().enumerate() {
            write!(f, "{:>row_width$} ", row + 1)?;
            for &cell in cells.iter() {
                write!(f, " {:>col_width$}", symbol(cell))?;
            }
            writeln!(f)?;
        }

        match board.state() {
            BoardState::Won => writeln!(f, "Cleared! `n` for a new game, `q` to quit."),
            BoardState::Lost => writeln!(f, "Boom! `n` for a new game, `q` to quit."),
            BoardState::Ready | BoardState::Active => Ok(()),
        }
    }
}
