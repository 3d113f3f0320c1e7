//! Game loop plumbing - clocks, sampled input and the driver
//!
//! The core session never reads hardware or time. This crate supplies the
//! two seams it needs, an [`InputSource`] and a [`Clock`], together with a
//! [`Driver`] that applies the sampling rules (rising-edge rotate, switch
//! changes, per-poll direction priority) and publishes period changes back
//! to the clock.

pub mod clock;
pub mod config;
pub mod driver;
pub mod input;

pub use quadfall_core as core;
pub use quadfall_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use driver::{Driver, PollReport};
pub use input::{InputSample, InputSource, ScriptedInput};
