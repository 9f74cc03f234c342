//! CLI library components for the nozyk explorer.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod session;
