pub mod config;
pub mod error;
pub mod general;
pub mod utils;

pub use error::ValidationError;
pub use general::{ClientId, Score};
