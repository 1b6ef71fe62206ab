//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - DuckDB and in-memory repositories for members and users
//! - A moka-backed member cache
//! - Squad file formats (CSV, JSON, XML, binary)
//! - The CLI-facing container, router and controllers

pub mod adapter;
pub mod api;
pub mod storage;

pub use adapter::*;
pub use storage::*;
