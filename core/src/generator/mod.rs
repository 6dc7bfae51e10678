use crate::*;
pub use random::*;

mod random;

/// Strategy for placing the mines of a new game.
///
/// Games with a known layout skip this and go through [`PlayEngine::new`].
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
