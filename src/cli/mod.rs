//! CLI infrastructure for the tactictoe solver
//!
//! Commands for solving the game, querying positions against a compiled table
//! or live search, inspecting table files, and watching self-play.

pub mod commands;
pub mod config;
pub mod output;
