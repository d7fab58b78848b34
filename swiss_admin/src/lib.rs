//! Internal modules for the tournament admin tool.
//!
//! This library provides command parsing, configuration, execution and output
//! rendering used by the swiss_admin binary.

pub mod commands;
pub mod config;
pub mod output;
pub mod runner;
