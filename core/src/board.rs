use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Packed per-cell state for a whole game, stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Lays out the mines and counts each cell's mined neighbours.
    pub fn new(mine_layout: &MineLayout) -> Self {
        let mut cells: Array2<Cell> = Array2::default(mine_layout.size().to_nd_index());

        for coords in mine_layout.mine_coords() {
            cells[coords.to_nd_index()] = Cell::mine();
        }

        for coords in mine_layout.mine_coords() {
            for pos in cells.iter_neighbors(coords) {
                let neighbor = &mut cells[pos.to_nd_index()];
                if !neighbor.is_mine() {
                    neighbor.increment_adjacent();
                }
            }
        }

        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn index_of(&self, coords: Coord2) -> usize {
        to_index(coords, self.size())
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(Cell) -> bool) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|&cell| predicate(cell))
            .count() as u8
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn recount(layout: &MineLayout, coords: Coord2) -> u8 {
        NeighborIter::new(coords, layout.size())
            .filter(|&pos| layout.contains_mine(pos))
            .count() as u8
    }

    #[test]
    fn single_center_mine_counts_one_everywhere() {
        let board = board((3, 3), &[(1, 1)]);

        for (coords, cell) in board.iter() {
            if coords == (1, 1) {
                assert!(cell.is_mine());
            } else {
                assert_eq!(cell.adjacent_count(), 1, "at {coords:?}");
            }
        }
    }

    #[test]
    fn adjacency_matches_recount_on_non_square_board() {
        let layout = MineLayout::from_mine_coords((3, 5), &[(0, 4), (1, 0), (2, 2), (2, 3)]).unwrap();
        let board = Board::new(&layout);

        for (coords, cell) in board.iter() {
            if !cell.is_mine() {
                assert_eq!(
                    cell.adjacent_count(),
                    recount(&layout, coords),
                    "at {coords:?}"
                );
            }
        }
        // (1, 4) must not pick up the mine at (1, 0) on the opposite edge
        assert_eq!(board[(1, 4)].adjacent_count(), 2);
    }

    #[test]
    fn index_round_trips_through_coords() {
        let board = board((4, 6), &[(0, 0)]);

        for (coords, _) in board.iter() {
            assert_eq!(from_index(board.index_of(coords), board.size()), coords);
        }
        assert_eq!(board.index_of((2, 1)), 13);
    }

    #[test]
    fn validate_coords_rejects_outside_cells() {
        let board = board((2, 3), &[(0, 0)]);

        assert_eq!(board.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(
            board.validate_coords((2, 0)),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            board.validate_coords((0, 3)),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
    }
}
