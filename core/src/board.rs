use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal command. Whether the move ended the round is
/// decided separately by [`Board::check_end`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// Terminal evaluation of a round after a move.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    Ongoing,
    Lost,
    Won,
}

impl RoundState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// Visibility engine: pairs the immutable value grid with the mutable
/// per-cell visibility and applies player moves to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    values: ValueGrid,
    visibility: Array2<Visibility>,
}

impl Board {
    pub fn new(values: ValueGrid) -> Self {
        let size = values.size();
        Self {
            values,
            visibility: Array2::default(size.to_nd_index()),
        }
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn size(&self) -> Coord2 {
        self.values.size()
    }

    pub fn value_at(&self, pos: Coord2) -> i8 {
        self.values.value_at(pos)
    }

    pub fn visibility_at(&self, pos: Coord2) -> Visibility {
        self.visibility[pos.to_nd_index()]
    }

    /// Hidden cells become flagged and vice versa; revealed cells are
    /// left alone.
    pub fn toggle_flag(&mut self, pos: Coord2) -> Result<FlagOutcome> {
        let pos = self.values.validate_coords(pos)?;

        Ok(match self.visibility[pos.to_nd_index()] {
            Visibility::Hidden => {
                self.visibility[pos.to_nd_index()] = Visibility::Flagged;
                FlagOutcome::Changed
            }
            Visibility::Flagged => {
                self.visibility[pos.to_nd_index()] = Visibility::Hidden;
                FlagOutcome::Changed
            }
            Visibility::Revealed => FlagOutcome::NoChange,
        })
    }

    /// Reveals `pos`. A flagged cell must be unflagged first, so the
    /// command is ignored. A zero-valued cell opens its whole region via
    /// [`Board::flood_reveal`]; anything else (mines included) opens
    /// just the one cell.
    pub fn reveal(&mut self, pos: Coord2) -> Result<RevealOutcome> {
        let pos = self.values.validate_coords(pos)?;

        Ok(
            match (self.visibility[pos.to_nd_index()], self.values.value_at(pos)) {
                (Visibility::Flagged, _) => RevealOutcome::NoChange,
                (_, 0) => {
                    self.flood_reveal(pos);
                    RevealOutcome::Revealed
                }
                (Visibility::Hidden, _) => {
                    self.visibility[pos.to_nd_index()] = Visibility::Revealed;
                    RevealOutcome::Revealed
                }
                (Visibility::Revealed, _) => RevealOutcome::NoChange,
            },
        )
    }

    /// Reveals the maximal 8-connected zero-valued region containing
    /// `start`, plus every cell on its one-cell border. Connectivity is
    /// a property of the value grid alone, so the border can expose
    /// nonzero cells and even mines; losing stays keyed to the cell the
    /// player picked, not to border reveals.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut region = BTreeSet::from([start]);
        let mut frontier = VecDeque::from([start]);

        while let Some(pos) = frontier.pop_front() {
            for next in self.values.iter_neighbors(pos) {
                if self.values.value_at(next) == 0 && region.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        for &pos in &region {
            self.mark_revealed(pos);
            for border in self.values.iter_neighbors(pos) {
                self.mark_revealed(border);
            }
        }
    }

    /// Flagged cells are never auto-revealed by the flood.
    fn mark_revealed(&mut self, pos: Coord2) {
        if self.visibility[pos.to_nd_index()] != Visibility::Flagged {
            self.visibility[pos.to_nd_index()] = Visibility::Revealed;
        }
    }

    /// Evaluates the round after a move at `last`: a revealed mine
    /// there loses; a board with every non-mine cell revealed wins
    /// (mines need no flags).
    pub fn check_end(&self, last: Coord2) -> RoundState {
        if self.values.is_mine(last) && self.visibility_at(last).is_revealed() {
            return RoundState::Lost;
        }

        let hidden_safe_cells = self.visibility.indexed_iter().any(|((r, c), vis)| {
            let pos = (r as Coord, c as Coord);
            !self.values.is_mine(pos) && !vis.is_revealed()
        });
        if hidden_safe_cells {
            RoundState::Ongoing
        } else {
            RoundState::Won
        }
    }

    /// The win overwrite: every cell, mines and flags included, becomes
    /// visible for the final draw.
    pub fn reveal_all(&mut self) {
        self.visibility.fill(Visibility::Revealed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        let mines = MineGrid::from_mine_coords(size, mines).unwrap();
        Board::new(ValueGrid::from_mines(&mines))
    }

    #[test]
    fn flag_round_trip_restores_hidden() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(board.visibility_at((0, 0)), Visibility::Flagged);
        assert_eq!(board.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(board.visibility_at((0, 0)), Visibility::Hidden);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_no_op() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((2, 2)).unwrap();
        assert_eq!(board.toggle_flag((2, 2)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(board.visibility_at((2, 2)), Visibility::Revealed);
    }

    #[test]
    fn revealing_a_flagged_cell_is_a_no_op() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.visibility_at((0, 0)), Visibility::Flagged);
        assert_eq!(board.check_end((0, 0)), RoundState::Ongoing);
    }

    #[test]
    fn revealing_a_nonzero_cell_opens_only_that_cell() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.visibility_at((1, 1)), Visibility::Revealed);
        assert_eq!(board.value_at((1, 1)), 1);
        for pos in [(0, 1), (1, 0), (2, 2)] {
            assert_eq!(board.visibility_at(pos), Visibility::Hidden);
        }
    }

    #[test]
    fn flood_opens_region_and_border_but_nothing_else() {
        // mine in the far corner of a 5x5; the zero region touching
        // (0, 0) stops one cell short of it
        let mut board = board((5, 5), &[(4, 4)]);

        board.reveal((0, 0)).unwrap();

        for r in 0..5u8 {
            for c in 0..5u8 {
                let expected = if (r, c) == (4, 4) {
                    Visibility::Hidden
                } else {
                    Visibility::Revealed
                };
                assert_eq!(board.visibility_at((r, c)), expected, "at {:?}", (r, c));
            }
        }
    }

    #[test]
    fn flood_does_not_cross_a_numbered_wall() {
        // mines down the middle column wall off the right side
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        board.reveal((0, 0)).unwrap();

        // left region plus its border (the numbered column 1) is open
        for r in 0..3u8 {
            assert_eq!(board.visibility_at((r, 0)), Visibility::Revealed);
            assert_eq!(board.visibility_at((r, 1)), Visibility::Revealed);
            // the mines themselves and the far side stay hidden
            assert_eq!(board.visibility_at((r, 2)), Visibility::Hidden);
            assert_eq!(board.visibility_at((r, 3)), Visibility::Hidden);
            assert_eq!(board.visibility_at((r, 4)), Visibility::Hidden);
        }
    }

    #[test]
    fn flood_reveal_is_idempotent() {
        let mut board = board((5, 5), &[(4, 4)]);

        board.reveal((0, 0)).unwrap();
        let snapshot = board.clone();
        board.reveal((0, 0)).unwrap();

        assert_eq!(board, snapshot);
    }

    #[test]
    fn flood_never_unflags_a_cell() {
        let mut board = board((5, 5), &[(4, 4)]);

        // flag a cell inside the region and one on the border
        board.toggle_flag((1, 1)).unwrap();
        board.toggle_flag((3, 4)).unwrap();
        board.reveal((0, 0)).unwrap();

        assert_eq!(board.visibility_at((1, 1)), Visibility::Flagged);
        assert_eq!(board.visibility_at((3, 4)), Visibility::Flagged);
        assert_eq!(board.visibility_at((2, 2)), Visibility::Revealed);
    }

    #[test]
    fn loss_is_keyed_to_the_last_move() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((0, 0)).unwrap();
        // a revealed mine ends the round only when it was the move
        assert_eq!(board.check_end((1, 1)), RoundState::Ongoing);
        assert_eq!(board.check_end((0, 0)), RoundState::Lost);
    }

    #[test]
    fn revealing_a_mine_loses_on_that_move() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.check_end((0, 0)), RoundState::Lost);
    }

    #[test]
    fn win_requires_every_safe_cell() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.reveal((0, 1)).unwrap();
        board.reveal((1, 0)).unwrap();
        assert_eq!(board.check_end((1, 0)), RoundState::Ongoing);

        board.reveal((1, 1)).unwrap();
        assert_eq!(board.check_end((1, 1)), RoundState::Won);
    }

    #[test]
    fn win_ignores_flag_state_of_mines() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        for pos in [(0, 1), (1, 0), (1, 1)] {
            board.reveal(pos).unwrap();
        }
        assert_eq!(board.check_end((1, 1)), RoundState::Won);
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.toggle_flag((0, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn reveal_all_overwrites_everything() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.toggle_flag((1, 1)).unwrap();
        board.reveal_all();
        for pos in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(board.visibility_at(pos), Visibility::Revealed);
        }
    }
}
