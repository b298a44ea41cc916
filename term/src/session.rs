use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sweeper_core::{Board, GameConfig, Placement, Result};

use crate::command::Command;

/// What the front end should do after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Redraw,
    Unchanged,
    Help,
    Quit,
}

/// A run of games sharing one difficulty, placement policy and seed sequence.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    placement: Placement,
    seeds: SmallRng,
    board: Board,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Session {
    pub fn new(config: GameConfig, placement: Placement, seed: u64) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = Board::new(config, placement, seeds.random())?;
        Ok(Self {
            config,
            placement,
            seeds,
            board,
            started_at: None,
            ended_at: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Time since the first move, frozen once the game ends.
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    /// Throws the current board away and deals a fresh one.
    pub fn new_game(&mut self) -> Result<()> {
        self.board = Board::new(self.config, self.placement, self.seeds.random())?;
        self.started_at = None;
        self.ended_at = None;
        log::debug!("New game, seed: {}", self.board.seed());
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<Reply> {
        let changed = match command {
            Command::Reveal(coords) => self.board.reveal(coords).has_update(),
            Command::Flag(coords) => self.board.toggle_flag(coords).has_update(),
            Command::Chord(coords) => self.board.chord(coords).has_update(),
            Command::NewGame => {
                self.new_game()?;
                return Ok(Reply::Redraw);
            }
            Command::Help => return Ok(Reply::Help),
            Command::Quit => return Ok(Reply::Quit),
        };

        if !changed {
            log::trace!("{:?} had no effect", command);
            return Ok(Reply::Unchanged);
        }

        let now = Instant::now();
        self.started_at.get_or_insert(now);
        if self.board.is_game_over() && self.ended_at.is_none() {
            self.ended_at = Some(now);
            log::info!(
                "Game {} after {:.1}s",
                if self.board.is_victory() { "won" } else { "lost" },
                self.elapsed().as_secs_f32()
            );
        }
        Ok(Reply::Redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{BoardState, CellView, GameError};

    fn session(config: GameConfig) -> Session {
        Session::new(config, Placement::SafeFirstClick, 99).unwrap()
    }

    #[test]
    fn timer_waits_for_first_change() {
        let mut session = session(GameConfig::beginner());

        assert_eq!(session.apply(Command::Chord((0, 0))).unwrap(), Reply::Unchanged);
        assert_eq!(session.elapsed(), Duration::ZERO);

        assert_eq!(session.apply(Command::Reveal((4, 4))).unwrap(), Reply::Redraw);
        assert!(session.started_at.is_some());
        assert_eq!(session.board().cell_at((4, 4)), Some(CellView::Revealed(0)));
    }

    #[test]
    fn timer_freezes_when_game_ends() {
        let mut session = session(GameConfig::new_unchecked((3, 3), 0));

        assert_eq!(session.apply(Command::Reveal((0, 0))).unwrap(), Reply::Redraw);
        assert_eq!(session.board().state(), BoardState::Won);
        let frozen = session.elapsed();
        assert_eq!(session.elapsed(), frozen);
        assert_eq!(session.apply(Command::Flag((1, 1))).unwrap(), Reply::Unchanged);
    }

    #[test]
    fn new_game_builds_a_fresh_board() {
        let mut session = session(GameConfig::intermediate());
        session.apply(Command::Reveal((8, 8))).unwrap();
        let first_seed = session.board().seed();

        assert_eq!(session.apply(Command::NewGame).unwrap(), Reply::Redraw);
        assert!(!session.board().mines_placed());
        assert_eq!(session.board().revealed_count(), 0);
        assert_ne!(session.board().seed(), first_seed);
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn seed_makes_sessions_reproducible() {
        let mut a = session(GameConfig::expert());
        let mut b = session(GameConfig::expert());
        for _ in 0..3 {
            a.apply(Command::Reveal((7, 7))).unwrap();
            b.apply(Command::Reveal((7, 7))).unwrap();
            assert_eq!(a.board(), b.board());
            a.apply(Command::NewGame).unwrap();
            b.apply(Command::NewGame).unwrap();
        }
    }

    #[test]
    fn passes_through_control_commands() {
        let mut session = session(GameConfig::beginner());
        assert_eq!(session.apply(Command::Help).unwrap(), Reply::Help);
        assert_eq!(session.apply(Command::Quit).unwrap(), Reply::Quit);
    }

    #[test]
    fn rejects_unplayable_config() {
        let config = GameConfig::new_unchecked((3, 3), 1);
        assert!(matches!(
            Session::new(config, Placement::SafeFirstClick, 0),
            Err(GameError::TooManyMines { .. })
        ));
        assert!(Session::new(config, Placement::Eager, 0).is_ok());
    }
}
