//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the command definitions, the interactive prompt, and the presenter
//! that turns a lookup report into terminal output.

mod commands;
mod presenter;

pub use commands::*;
