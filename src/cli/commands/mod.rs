//! CLI subcommands

pub mod inspect;
pub mod play;
pub mod query;
pub mod search;
pub mod solve;
