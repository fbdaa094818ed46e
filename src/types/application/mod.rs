//! Application commands and interactions.

pub mod command;
pub mod interaction;
