//! Command-line front end for what-if delay forecasts
//!
//! Loads engine configuration, injects the wall clock and per-item seeds,
//! and renders forecasts as text or JSON.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod settings;

pub use cli::build_cli;
pub use commands::run;
pub use settings::{init_logging, load_config};
