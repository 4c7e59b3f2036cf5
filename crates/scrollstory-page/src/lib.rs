//! Scrollstory: page wiring.
//!
//! Connects the navigation state machine, the visual layers, the unpin
//! handler and sound feedback behind a single input surface, and drives
//! them from a tokio runtime.

pub mod assets;
pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod input;
pub mod loading;
pub mod page;
pub mod runtime;
pub mod script;
pub mod teardown;
