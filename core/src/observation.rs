use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player sees on a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    Hidden,
    Flag,
    Unsure,
    Revealed(u8),
    Mine,
}

impl Symbol {
    /// Mines only show once the game is over; otherwise revealed beats flagged beats unsure.
    pub const fn for_cell(cell: Cell, game_over: bool) -> Self {
        if game_over && cell.is_mine() {
            Self::Mine
        } else if cell.is_revealed() {
            Self::Revealed(cell.adjacent_count())
        } else if cell.is_flagged() {
            Self::Flag
        } else if cell.is_unsure() {
            Self::Unsure
        } else {
            Self::Hidden
        }
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Player-visible snapshot of a game, safe to hand to any front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub outcome: Outcome,
    pub mines_left: isize,
    pub symbols: Array2<Symbol>,
}

impl Observation {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let game_over = engine.is_finished();
        let symbols = engine
            .board()
            .cells()
            .map(|&cell| Symbol::for_cell(cell, game_over));

        Self {
            size: engine.size(),
            outcome: engine.outcome(),
            mines_left: engine.mines_left(),
            symbols,
        }
    }

    pub fn symbol_at(&self, coords: Coord2) -> Option<Symbol> {
        self.symbols.get(coords.to_nd_index()).copied()
    }

    /// Board rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Symbol>> {
        self.symbols.rows().into_iter()
    }
}
