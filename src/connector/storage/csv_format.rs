use std::path::Path;

use tracing::debug;

use super::dto::MemberRecord;
use crate::domain::{DomainError, Member};

pub(super) fn read(path: &Path) -> Result<Vec<Member>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DomainError::storage(format!("Failed to open CSV file: {}", e)))?;

    let mut members = Vec::new();
    for (index, result) in reader.deserialize::<MemberRecord>().enumerate() {
        let record = result.map_err(|e| {
            DomainError::storage(format!("Record {}: malformed CSV row: {}", index + 1, e))
        })?;
        members.push(record.into_member(index + 1)?);
    }

    debug!("Read {} members from CSV {}", members.len(), path.display());
    Ok(members)
}

pub(super) fn write(path: &Path, members: &[Member]) -> Result<(), DomainError> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| DomainError::storage(format!("Failed to create CSV file: {}", e)))?;

    for member in members {
        writer
            .serialize(MemberRecord::from_member(member))
            .map_err(|e| DomainError::storage(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| DomainError::storage(format!("Failed to flush CSV file: {}", e)))?;

    debug!("Wrote {} members to CSV {}", members.len(), path.display());
    Ok(())
}
