//! Terminal frontend.
//!
//! A small game-oriented rendering layer: [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`] with no
//! I/O, and [`TerminalRenderer`] flushes frames to the terminal through
//! crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use quadfall_core as core;
pub use quadfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
