//! Command-line front end for the trick set allocator.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
