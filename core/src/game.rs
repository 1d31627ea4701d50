use serde::{Deserialize, Serialize};

use crate::*;

/// Result of feeding one command to the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Move applied (or ignored), round continues.
    Ongoing,
    Help,
    Restart,
    Quit,
    Lost,
    Won,
}

/// One board's worth of play. Grids are created on the first move so
/// the safe zone can center on it; until then every cell renders as
/// hidden.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    config: GameConfig,
    seed: u64,
    board: Option<Board>,
    state: RoundState,
}

impl Round {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            board: None,
            state: RoundState::Ongoing,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn has_board(&self) -> bool {
        self.board.is_some()
    }

    /// What a renderer shows at `pos` right now.
    pub fn cell(&self, pos: Coord2) -> Cell {
        match &self.board {
            None => Cell::Hidden,
            Some(board) => match board.visibility_at(pos) {
                Visibility::Hidden => Cell::Hidden,
                Visibility::Flagged => Cell::Flagged,
                Visibility::Revealed => Cell::Revealed(board.value_at(pos)),
            },
        }
    }

    /// Applies a reveal or flag move and evaluates the round. The first
    /// move of any kind births the grids, centered for safety on that
    /// move. On a win the whole board is forced visible.
    pub fn apply_move(&mut self, pos: Coord2, flag: bool) -> Result<RoundState> {
        if self.state.is_finished() {
            return Err(GameError::RoundOver);
        }
        if pos.0 >= self.config.height || pos.1 >= self.config.width {
            return Err(GameError::OutOfBounds);
        }

        let (config, seed) = (self.config, self.seed);
        let board = self.board.get_or_insert_with(|| {
            let mines = RandomMinefieldGenerator::new(seed, pos).generate(config);
            Board::new(ValueGrid::from_mines(&mines))
        });

        if flag {
            board.toggle_flag(pos)?;
        } else {
            board.reveal(pos)?;
        }

        self.state = board.check_end(pos);
        if self.state == RoundState::Won {
            board.reveal_all();
        }
        Ok(self.state)
    }
}

/// Top-level state machine: owns the current round and turns parsed
/// commands into transitions. Control commands pass straight through
/// as [`Step`] variants instead of surfacing as errors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    round: Round,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            round: Round::new(config, seed),
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn apply(&mut self, command: Command) -> Result<Step> {
        Ok(match command {
            Command::Quit => Step::Quit,
            Command::Restart => Step::Restart,
            Command::Help => Step::Help,
            Command::Move { pos, flag } => match self.round.apply_move(pos, flag)? {
                RoundState::Ongoing => Step::Ongoing,
                RoundState::Lost => Step::Lost,
                RoundState::Won => Step::Won,
            },
        })
    }
}
