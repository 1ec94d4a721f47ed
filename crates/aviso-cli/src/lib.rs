//! CLI library components for the aviso master sheet generator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod summary;
