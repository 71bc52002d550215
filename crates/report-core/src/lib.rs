pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

pub use config::*;
pub use error::*;
pub use outcome::*;
pub use types::*;
