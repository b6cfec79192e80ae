//! Common types used across the application.

pub mod country;
pub mod id;

pub use country::{Country, LocationCode};
pub use id::*;
