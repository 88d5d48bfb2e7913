//! Command-line front end for remote code execution
//!
//! Stands in for the editor form: it gathers the draft (source, language,
//! stdin) from files and flags, layers flag overrides on top of the loaded
//! configuration, and prints the result pane as the session moves through
//! its states.

pub mod input;
pub mod overrides;
pub mod runner;
