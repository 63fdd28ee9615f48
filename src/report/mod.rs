//! Report construction: comparison table and final assembly

mod assembler;
mod comparison;

pub use assembler::ReportAssembler;
pub use comparison::ComparisonBuilder;
