//! Display strings derived from No-Intro style game names.
//!
//! RDB records carry the full database name, e.g.
//! `"Super Game (USA) (Rev 1)"`. Library views want the bare title and a short
//! region code instead; this crate derives both.

pub mod name;
pub mod region;

pub use name::{DumpStatus, ParsedGameName, display_name, parse_game_name};
pub use region::{region_code, region_code_for};
