//! Pure, deterministic pipeline logic. No I/O.

pub mod quiz;
pub mod table;
