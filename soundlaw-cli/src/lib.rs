//! Soundlaw CLI library
//!
//! This library provides the command-line interface for the soundlaw
//! sound-change compiler and syllable analyzer.

pub mod batch;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod phonology_source;
pub mod progress;

pub use error::{CliError, CliResult};
