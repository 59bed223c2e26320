use crate::core::Storage;
use crate::utils::error::{ExportError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        let write_failed = |source: std::io::Error| ExportError::WriteFailed {
            path: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }

        fs::write(&full_path, data).map_err(write_failed)?;
        Ok(())
    }
}
