//! CLI library components for the case/rainfall join.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
