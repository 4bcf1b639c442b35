//! Severity blending, weighted aggregation, and decision mapping.

pub mod aggregator;
pub mod blend;
pub mod decision;

pub use aggregator::aggregate;
pub use decision::decide;
