use serde::{Deserialize, Serialize};

/// Per-cell visibility tracked by the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a renderer sees for one cell: visibility combined with the value
/// where it matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Hidden,
    Flagged,
    Revealed(i8),
}
