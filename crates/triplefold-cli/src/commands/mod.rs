//! CLI command implementations.

pub mod init;
pub mod reduce;
pub mod stats;
