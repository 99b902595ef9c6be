//! Command-line front end for the Wormhole URL shortener.

pub mod app;
pub mod cli;
pub mod logging;
pub mod output;

pub use app::{App, Outcome};
pub use cli::{Cli, Command};
