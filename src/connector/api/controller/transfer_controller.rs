use std::path::PathBuf;

use anyhow::Result;

use super::super::Container;

pub struct TransferController<'a> {
    container: &'a Container,
}

impl<'a> TransferController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn import(&self, file: PathBuf) -> Result<String> {
        let imported = self.container.import_use_case().execute(&file).await?;
        Ok(format!(
            "Imported {} members from {}",
            imported.len(),
            file.display()
        ))
    }

    pub async fn export(&self, file: PathBuf) -> Result<String> {
        let count = self.container.export_use_case().execute(&file).await?;
        Ok(format!("Exported {} members to {}", count, file.display()))
    }
}
