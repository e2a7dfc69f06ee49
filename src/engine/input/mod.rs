// Input: actions, bindings, and per-tick state

mod action;
mod state;

pub use action::{default_bindings, Action};
pub use state::InputState;
