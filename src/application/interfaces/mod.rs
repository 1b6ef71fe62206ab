mod member_cache;
mod member_repository;
mod member_storage;
mod user_repository;

pub use member_cache::*;
pub use member_repository::*;
pub use member_storage::*;
pub use user_repository::*;
