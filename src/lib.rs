//! Quadfall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so binaries, tests and
//! benches can use `quadfall::{core,engine,input,term,types}`.

pub use quadfall_core as core;
pub use quadfall_engine as engine;
pub use quadfall_input as input;
pub use quadfall_term as term;
pub use quadfall_types as types;
