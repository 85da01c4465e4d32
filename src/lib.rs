//! Library entry point for the graveyard CLI.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod error;
pub mod invoke;
pub mod last_use;
pub mod model;
pub mod normalize;
pub mod scanner;
pub mod scorer;
pub mod size;
pub mod utils;
