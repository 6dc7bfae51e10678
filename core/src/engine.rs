use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game: the mine layout, the player-facing cell state, and the outcome.
///
/// Every action validates its coordinates first, then refuses to run once the game is
/// finished, returning [`GameError::AlreadyEnded`] and leaving the board untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayEngine")]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Board,
    safe_cells_left: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

#[derive(Deserialize)]
struct RawPlayEngine {
    mine_layout: MineLayout,
    board: Board,
    safe_cells_left: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<RawPlayEngine> for PlayEngine {
    type Error = GameError;

    /// The board must carry the layout's mines, and the counter and outcome must agree with it.
    fn try_from(raw: RawPlayEngine) -> Result<Self> {
        let size = raw.mine_layout.size();
        let mines_match = raw.board.size() == size
            && raw
                .board
                .iter()
                .all(|(coords, cell)| cell.is_mine() == raw.mine_layout.contains_mine(coords));
        let hidden_safe = raw
            .board
            .iter()
            .filter(|(_, cell)| !cell.is_mine() && !cell.is_revealed())
            .count();
        let won = raw.outcome == Outcome::Won;

        if !mines_match
            || usize::from(raw.safe_cells_left) != hidden_safe
            || won != (hidden_safe == 0)
        {
            return Err(GameError::InvalidConfiguration {
                rows: size.0,
                cols: size.1,
                mines: raw.mine_layout.mine_count(),
            });
        }

        Ok(Self {
            mine_layout: raw.mine_layout,
            board: raw.board,
            safe_cells_left: raw.safe_cells_left,
            outcome: raw.outcome,
            triggered_mine: raw.triggered_mine,
        })
    }
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let board = Board::new(&mine_layout);
        Self {
            safe_cells_left: mine_layout.safe_cell_count(),
            mine_layout,
            board,
            outcome: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn new_game(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let mine_layout = generator.generate(config)?;
        Ok(Self::new(mine_layout))
    }

    pub fn new_random(size: Coord2, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(size, mines)?;
        Self::new_game(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Mines not yet accounted for by a flag on a hidden cell. Goes negative with too many flags.
    pub fn mines_left(&self) -> isize {
        let flags = self
            .board
            .iter()
            .filter(|(_, cell)| cell.is_flagged() && !cell.is_revealed())
            .count();
        self.mine_layout.mine_count() as isize - flags as isize
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords])
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Every mine position. Front ends should only show these once the game is finished.
    pub fn mine_locations(&self) -> BTreeSet<Coord2> {
        self.mine_layout.mine_coords().collect()
    }

    /// Row-major indices of every cell the player has not revealed yet.
    pub fn unrevealed_indices(&self) -> BTreeSet<usize> {
        let size = self.size();
        self.board
            .iter()
            .filter(|(_, cell)| !cell.is_revealed())
            .map(|(coords, _)| to_index(coords, size))
            .collect()
    }

    pub fn observe(&self) -> Observation {
        Observation::from_engine(self)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(self.reveal_cell(coords))
    }

    /// On a number whose flagged neighbours match it, reveals every other hidden neighbour.
    /// Anywhere else it acts like [`Self::reveal`].
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.board[coords];
        if !cell.is_revealed()
            || cell.adjacent_count() != self.board.count_neighbors(coords, Cell::is_flagged)
        {
            return Ok(self.reveal_cell(coords));
        }

        let mut outcome = RevealOutcome::NoChange;
        for pos in self.board.iter_neighbors(coords) {
            if self.is_finished() {
                break;
            }
            let neighbor = self.board[pos];
            if neighbor.is_flagged() || neighbor.is_revealed() {
                continue;
            }
            outcome = outcome | self.reveal_cell(pos);
        }
        Ok(outcome)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.mark(coords, |cell| cell.set_flagged(true))
    }

    pub fn mark_unsure(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.mark(coords, |cell| cell.set_unsure(true))
    }

    pub fn clear_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.mark(coords, Cell::clear_marks)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.mark(coords, |cell| cell.set_flagged(!cell.is_flagged()))
    }

    fn mark(&mut self, coords: Coord2, apply: impl FnOnce(&mut Cell) -> bool) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(apply(&mut self.board[coords]).into())
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        match flood_reveal(&mut self.board, coords) {
            Flood::Mine => {
                self.triggered_mine = Some(coords);
                self.end_game(Outcome::Lost);
                RevealOutcome::HitMine
            }
            Flood::Opened(0) => RevealOutcome::NoChange,
            Flood::Opened(opened) => {
                self.safe_cells_left -= opened;
                if self.safe_cells_left == 0 {
                    self.end_game(Outcome::Won);
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
        }
    }

    fn end_game(&mut self, outcome: Outcome) {
        if self.outcome.is_finished() {
            return;
        }

        log::debug!("Game finished: {outcome:?}");
        self.outcome = outcome;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.outcome.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
