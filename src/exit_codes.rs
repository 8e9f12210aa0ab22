//! Stable exit codes for mcqgen CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/template/document or CLI misuse.
pub const INVALID: i32 = 1;
/// The chain backend failed: spawn error, timeout, or malformed/schema-invalid output.
pub const CHAIN_FAILED: i32 = 2;
