use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn exists(&self, path: &str) -> Result<bool> {
        match tokio::fs::metadata(self.resolve(path)).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_to_string(&self, path: &str) -> Result<String> {
        let data = tokio::fs::read_to_string(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write(&self, path: &str, contents: &str) -> Result<()> {
        tokio::fs::write(self.resolve(path), contents).await?;
        Ok(())
    }

    fn display_path(&self, path: &str) -> String {
        self.resolve(path).display().to_string()
    }
}
