use serde::{Deserialize, Serialize};

/// Internal per-position record owned by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    /// Adjacent mine count, `None` when the cell itself holds a mine.
    pub(crate) const fn adjacent_mines(self) -> Option<u8> {
        if self.mine { None } else { Some(self.adjacent) }
    }

    pub(crate) const fn is_settled(self) -> bool {
        self.revealed || self.flagged
    }
}

/// Player-visible state of a single cell.
///
/// Mines only show up once the game has ended, either as the one that was
/// stepped on or through the end-of-game annotations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
    // these are only used to show result after the game finishes:
    Mine,
    AutoFlag,
    IncorrectFlag,
}

impl CellView {
    /// Whether the cell is visually closed.
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Exploded => false,
            Mine => false,
            AutoFlag => true,
            IncorrectFlag => true,
        }
    }

    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Flagged | Self::AutoFlag | Self::IncorrectFlag)
    }
}
