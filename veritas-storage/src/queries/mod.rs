//! Typed query functions, one module per table.

pub mod audit;
pub mod decisions;
pub mod requests;
pub mod signals;
