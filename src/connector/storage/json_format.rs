use std::fs;
use std::path::Path;

use tracing::debug;

use super::dto::MemberRecord;
use crate::domain::{DomainError, Member};

pub(super) fn read(path: &Path) -> Result<Vec<Member>, DomainError> {
    let content = fs::read_to_string(path)
        .map_err(|e| DomainError::storage(format!("Failed to read JSON file: {}", e)))?;

    let records: Vec<MemberRecord> = serde_json::from_str(&content)
        .map_err(|e| DomainError::storage(format!("Failed to parse JSON: {}", e)))?;

    let members = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_member(index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Read {} members from JSON {}", members.len(), path.display());
    Ok(members)
}

pub(super) fn write(path: &Path, members: &[Member]) -> Result<(), DomainError> {
    let records: Vec<MemberRecord> = members.iter().map(MemberRecord::from_member).collect();
    let content = serde_json::to_string_pretty(&records)
        .map_err(|e| DomainError::storage(format!("Failed to serialize JSON: {}", e)))?;

    fs::write(path, content)
        .map_err(|e| DomainError::storage(format!("Failed to write JSON file: {}", e)))?;

    debug!("Wrote {} members to JSON {}", members.len(), path.display());
    Ok(())
}
