//! ROOST Core — domain models, store traits, and shared error types
//! for the poultry-farm management platform.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{RoostError, RoostResult};
