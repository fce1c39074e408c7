//! Command implementations for the `autodt` binary

pub mod check;
pub mod describe;
pub mod translate;
pub mod upgrade;
