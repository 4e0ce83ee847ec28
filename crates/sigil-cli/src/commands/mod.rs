// crates/sigil-cli/src/commands/mod.rs

pub mod engagement;
pub mod matching;
pub mod rank;
pub mod score;
