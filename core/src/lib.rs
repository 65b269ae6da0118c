//! # Scriptor Core
//!
//! Turns colour-coded RTF transcripts into role-tagged scripts.
//!
//! * **[`rtf`]**: tokens, colour table and control-sequence inventory.
//! * **[`script`]**: extraction of speaker turns from coloured text.
//! * **[`converter`]**: batch conversion of a directory of discussions.
//! * **[`names`]**: the name syllabifier.

pub mod converter;
pub mod errors;
pub mod names;
pub mod rtf;
pub mod script;
