//! Side-effecting operations: filesystem, config, chain process execution.

pub mod chain;
pub mod config;
pub mod document;
pub mod process;
pub mod prompt;
pub mod scaffold;
pub mod template;
