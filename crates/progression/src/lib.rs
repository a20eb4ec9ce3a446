pub mod ladder;
pub mod tracker;

pub use ladder::Ladder;
pub use tracker::{add_xp, LevelUp};
