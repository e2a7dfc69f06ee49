// Game logic: the pidgin, its tuning, and the per-frame session

mod player;
mod session;
mod tuning;

pub use player::{Moves, Player};
pub use session::{GameSession, SpriteSet};
pub use tuning::Tuning;
