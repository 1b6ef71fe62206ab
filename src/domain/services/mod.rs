//! Domain services containing core business rules.

mod credentials;
mod member_validator;

pub use credentials::*;
pub use member_validator::*;
