//! Shared building blocks for scriptor: colour notation, colour-to-role tag
//! maps, run configuration and the status logging macros used by every crate.

pub mod color;
pub mod config;
pub mod log;
pub mod tagmap;
