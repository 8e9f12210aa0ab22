//! MCQ generation workspace tool.
//!
//! This crate scaffolds a quiz-generation workspace and drives a two-stage
//! multiple-choice question pipeline (generate, then review) around an
//! external chain backend. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (quiz data model, table rows,
//!   payload extraction). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (scaffolding, template/config
//!   loading, document reading, chain process execution). Isolated to enable
//!   scripted backends in tests.
//! - **[`agents`]**: Stage wrappers that own an output schema and a prompt,
//!   and run the chain through the [`io::chain::Chain`] trait.
//!
//! [`generate`] coordinates core logic with I/O to implement the CLI
//! `generate` command.

pub mod agents;
pub mod core;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
