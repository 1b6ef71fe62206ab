use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{binary_format, csv_format, json_format, xml_format};
use crate::application::MemberStorage;
use crate::domain::{DomainError, Member};

/// Squad file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Xml,
    Binary,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            "xml" => Some(FileFormat::Xml),
            "bin" => Some(FileFormat::Binary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Xml => "xml",
            FileFormat::Binary => "bin",
        }
    }

    fn read(self, path: &Path) -> Result<Vec<Member>, DomainError> {
        match self {
            FileFormat::Csv => csv_format::read(path),
            FileFormat::Json => json_format::read(path),
            FileFormat::Xml => xml_format::read(path),
            FileFormat::Binary => binary_format::read(path),
        }
    }

    fn write(self, path: &Path, members: &[Member]) -> Result<(), DomainError> {
        match self {
            FileFormat::Csv => csv_format::write(path, members),
            FileFormat::Json => json_format::write(path, members),
            FileFormat::Xml => xml_format::write(path, members),
            FileFormat::Binary => binary_format::write(path, members),
        }
    }
}

/// Dispatches squad file reads and writes to the format matching the extension.
///
/// Files with an unrecognised extension are read as binary; writing them is refused.
#[derive(Debug, Clone, Default)]
pub struct FileMemberStorage;

impl FileMemberStorage {
    pub fn new() -> Self {
        Self
    }

    fn check_readable(path: &Path) -> Result<(), DomainError> {
        if !path.is_file() {
            return Err(DomainError::storage(format!(
                "{} does not exist or is not a file",
                path.display()
            )));
        }
        File::open(path).map_err(|e| {
            DomainError::storage(format!("{} is not readable: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn check_writable(path: &Path) -> Result<(), DomainError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(DomainError::storage(format!(
                "Parent directory {} does not exist",
                parent.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberStorage for FileMemberStorage {
    async fn read(&self, path: &Path) -> Result<Vec<Member>, DomainError> {
        Self::check_readable(path)?;

        let format = FileFormat::from_path(path).unwrap_or_else(|| {
            warn!(
                "Unrecognised extension for {}, reading it as binary",
                path.display()
            );
            FileFormat::Binary
        });
        debug!("Reading {} as {}", path.display(), format.as_str());

        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || format.read(&path))
            .await
            .map_err(|e| DomainError::internal(format!("Read task failed: {}", e)))?
    }

    async fn write(&self, path: &Path, members: &[Member]) -> Result<(), DomainError> {
        Self::check_writable(path)?;

        let format = FileFormat::from_path(path).ok_or_else(|| {
            DomainError::storage(format!(
                "Unsupported file extension for {} (expected csv, json, xml or bin)",
                path.display()
            ))
        })?;
        debug!("Writing {} members to {} as {}", members.len(), path.display(), format.as_str());

        let path: PathBuf = path.to_path_buf();
        let members = members.to_vec();
        tokio::task::spawn_blocking(move || format.write(&path, &members))
            .await
            .map_err(|e| DomainError::internal(format!("Write task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_path(Path::new("dir/a.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("a.xml")), Some(FileFormat::Xml));
        assert_eq!(FileFormat::from_path(Path::new("a.bin")), Some(FileFormat::Binary));
        assert_eq!(FileFormat::from_path(Path::new("a.dat")), None);
        assert_eq!(FileFormat::from_path(Path::new("noext")), None);
    }
}
