use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    struct CellBits: u8 {
        const REVEALED = 0b1000_0000;
        const FLAGGED = 0b0100_0000;
        const UNSURE = 0b0010_0000;
        const MINE = 0b0001_0000;
        const ADJACENT = 0b0000_1111;
    }
}

/// State of a single board cell, packed into one byte.
///
/// The default cell is a hidden, unmarked, safe cell with no adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    bits: CellBits,
}

impl Cell {
    pub const fn mine() -> Self {
        Self {
            bits: CellBits::MINE,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.bits.contains(CellBits::MINE)
    }

    pub const fn is_revealed(self) -> bool {
        self.bits.contains(CellBits::REVEALED)
    }

    pub const fn is_flagged(self) -> bool {
        self.bits.contains(CellBits::FLAGGED)
    }

    pub const fn is_unsure(self) -> bool {
        self.bits.contains(CellBits::UNSURE)
    }

    /// Mines in the clipped 8-neighbourhood. Meaningless for a mine cell.
    pub const fn adjacent_count(self) -> u8 {
        self.bits.bits() & CellBits::ADJACENT.bits()
    }

    /// Returns whether the cell changed; revealing twice is a no-op.
    pub fn reveal(&mut self) -> bool {
        if self.is_revealed() {
            return false;
        }
        self.bits.insert(CellBits::REVEALED);
        true
    }

    /// Setting a flag clears an unsure mark. No-op on a revealed cell.
    pub fn set_flagged(&mut self, flagged: bool) -> bool {
        self.set_mark(CellBits::FLAGGED, CellBits::UNSURE, flagged)
    }

    /// Setting an unsure mark clears a flag. No-op on a revealed cell.
    pub fn set_unsure(&mut self, unsure: bool) -> bool {
        self.set_mark(CellBits::UNSURE, CellBits::FLAGGED, unsure)
    }

    /// Drops both marks, revealed or not.
    pub fn clear_marks(&mut self) -> bool {
        let before = self.bits;
        self.bits.remove(CellBits::FLAGGED | CellBits::UNSURE);
        before != self.bits
    }

    pub(crate) fn increment_adjacent(&mut self) {
        let count = self.adjacent_count();
        debug_assert!(count < 8, "a cell has at most 8 neighbours");
        self.bits = self.bits.difference(CellBits::ADJACENT)
            | CellBits::from_bits_retain(count + 1);
    }

    fn set_mark(&mut self, mark: CellBits, exclusive: CellBits, value: bool) -> bool {
        if self.is_revealed() {
            return false;
        }

        let before = self.bits;
        if value {
            self.bits.remove(exclusive);
            self.bits.insert(mark);
        } else {
            self.bits.remove(mark);
        }
        before != self.bits
    }
}
