//! Squad file formats: CSV, JSON, XML and a big-endian binary layout.

mod binary_format;
mod csv_format;
mod dto;
mod file_member_storage;
mod json_format;
mod xml_format;

pub use dto::MemberRecord;
pub use file_member_storage::*;
