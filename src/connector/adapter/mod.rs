mod duckdb_member_repository;
mod duckdb_user_repository;
mod in_memory_member_repository;
mod in_memory_user_repository;
mod moka_member_cache;

pub use duckdb_member_repository::*;
pub use duckdb_user_repository::*;
pub use in_memory_member_repository::*;
pub use in_memory_user_repository::*;
pub use moka_member_cache::*;
