pub mod align;
pub mod comparison;
pub mod curve;
pub mod positioning;
pub mod premium;
pub mod turnover;

#[cfg(test)]
mod positioning_tests;

pub use align::*;
pub use comparison::*;
pub use curve::*;
pub use positioning::*;
pub use premium::*;
pub use turnover::*;
