#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observation::*;
pub use reveal::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod observation;
mod reveal;
mod types;

/// Board dimensions `(rows, cols)` together with the number of mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    /// A board needs at least one mine and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Fixed set of mine positions for one game.
///
/// Deserializing goes through the same checks as the constructors, so a layout never holds
/// a board without mines, a board without safe cells, or a stale mine count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        let layout = Self::from_mine_mask(raw.mine_mask)?;
        if layout.mine_count != raw.mine_count {
            let (rows, cols) = layout.size();
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: raw.mine_count,
            });
        }
        Ok(layout)
    }
}

impl MineLayout {
    fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let (Ok(rows), Ok(cols), Ok(mines)) = (
            Coord::try_from(rows),
            Coord::try_from(cols),
            CellCount::try_from(mine_count),
        ) else {
            return Err(GameError::InvalidConfiguration {
                rows: Coord::MAX,
                cols: Coord::MAX,
                mines: CellCount::MAX,
            });
        };

        let config = GameConfig::new((rows, cols), mines)?;
        Ok(Self {
            mine_mask,
            mine_count: config.mines,
        })
    }

    /// Builds a layout from explicit `(row, col)` positions. Duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds {
                    row: coords.0,
                    col: coords.1,
                });
            }
            if core::mem::replace(&mut mine_mask[coords.to_nd_index()], true) {
                log::warn!("Duplicate mine at {coords:?} ignored");
            }
        }

        Self::from_mine_mask(mine_mask)
    }

    /// Builds a layout from row-major cell indices.
    pub fn from_mine_indices(size: Coord2, mine_indices: &[usize]) -> Result<Self> {
        let total = usize::from(mult(size.0, size.1));
        let mut mine_coords = alloc::vec::Vec::with_capacity(mine_indices.len());

        for &index in mine_indices {
            if index >= total {
                let cols = usize::from(size.1.max(1));
                return Err(GameError::OutOfBounds {
                    row: Coord::try_from(index / cols).unwrap_or(Coord::MAX),
                    col: Coord::try_from(index % cols).unwrap_or(Coord::MAX),
                });
            }
            mine_coords.push(from_index(index, size));
        }

        Self::from_mine_coords(size, &mine_coords)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.game_config().safe_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl From<bool> for MarkOutcome {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::NoChange }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
