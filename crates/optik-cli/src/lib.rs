//! CLI library components for the optik command.

pub mod logging;
