use alloc::vec::Vec;

use crate::*;

/// What a flood fill did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flood {
    /// The start cell is a mine; nothing was revealed.
    Mine,
    /// Number of cells newly revealed, zero when the start was already open.
    Opened(CellCount),
}

/// Reveals `start` and, if it has no adjacent mines, the whole connected zero region around it
/// together with the numbered cells bordering that region.
///
/// Marks do not stop the flood: a flagged or unsure cell reached by it is revealed with its
/// mark bits left in place. Each cell is revealed at most once, so the work is bounded by the
/// number of cells on the board.
pub fn flood_reveal(board: &mut Board, start: Coord2) -> Flood {
    if board[start].is_mine() {
        return Flood::Mine;
    }

    let mut opened: CellCount = 0;
    let mut to_visit = Vec::from([start]);

    while let Some(coords) = to_visit.pop() {
        let cell = &mut board[coords];
        if !cell.reveal() {
            continue;
        }
        opened += 1;

        if cell.adjacent_count() == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|&pos| !board[pos].is_revealed()),
            );
        }
    }

    if opened > 1 {
        log::trace!("Flood from {start:?} opened {opened} cells");
    }
    Flood::Opened(opened)
}
