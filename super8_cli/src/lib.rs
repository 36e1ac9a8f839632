//! Internal modules for the Super 8 command line driver.
//!
//! The `super8` binary parses arguments and delegates to [`commands`].

pub mod commands;
