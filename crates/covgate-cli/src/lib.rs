//! Covgate CLI - batch front end for the evidence resolution engine.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod sources;

pub use cli::{Cli, CliFormat};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::{Formatter, SlotRecord};
