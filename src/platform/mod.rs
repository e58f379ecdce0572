//! Platform abstraction layer
//!
//! Turns host input events (DOM key codes, pointer events) into the
//! per-frame `TickInput` the simulation consumes. Event delivery is
//! asynchronous on the host side; the simulation only ever sees the last
//! known state, sampled once at the start of each frame.

pub mod input;

pub use input::{Command, InputState, Key};
