//! AutoHire terminal application: config, input handling, command
//! processing and card rendering around the core domain crates.

pub mod config;
pub mod forms;
pub mod input;
pub mod processor;
pub mod render;
