//! # Domain Layer
//!
//! Squad members, users, validation rules and squad queries.
//! This layer is independent of storage and presentation.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
