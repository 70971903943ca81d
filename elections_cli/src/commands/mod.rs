//! CLI subcommand implementations.

pub mod bootstrap;
pub mod call;
pub mod load;
pub mod render;
pub mod seed;
pub mod summary;
