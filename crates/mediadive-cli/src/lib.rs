//! CLI library components for the MediaDive catalog browser.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod views;
