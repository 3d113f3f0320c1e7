//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] and turns the
//! keyboard into an [`InputSource`](crate::engine::InputSource): four
//! direction switches toggled by the arrow keys or WASD, and one button on
//! Space.

pub mod handler;
pub mod map;

pub use quadfall_engine as engine;
pub use quadfall_types as types;

pub use handler::KeyboardInput;
pub use map::{handle_key_event, should_quit};
