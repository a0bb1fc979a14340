use crate::domain::model::DirEntryInfo;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolboxError};
use std::io::ErrorKind;
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

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tokio::fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolboxError::FileNotFound {
                path: full_path.display().to_string(),
            },
            _ => ToolboxError::IoError(e),
        })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>> {
        let full_path = self.resolve(path);
        let metadata = tokio::fs::metadata(&full_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ToolboxError::DirectoryNotFound {
                    path: full_path.display().to_string(),
                },
                _ => ToolboxError::IoError(e),
            })?;
        if !metadata.is_dir() {
            return Err(ToolboxError::NotADirectory {
                path: full_path.display().to_string(),
            });
        }

        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(&full_path).await?;
        while let Some(entry) = reader.next_entry().await? {
            let file_type = entry.file_type().await?;
            match entry.file_name().into_string() {
                Ok(name) => entries.push(DirEntryInfo {
                    name,
                    is_file: file_type.is_file(),
                }),
                Err(raw) => {
                    tracing::warn!("Skipping entry with non UTF-8 name: {:?}", raw);
                }
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn is_dir(&self, path: &Path) -> Result<bool> {
        let full_path = self.resolve(path);
        match tokio::fs::metadata(&full_path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ToolboxError::FileNotFound {
                path: full_path.display().to_string(),
            }),
            Err(e) => Err(ToolboxError::IoError(e)),
        }
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.resolve(path)).await?)
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        tokio::fs::rename(self.resolve(from), self.resolve(to)).await?;
        Ok(())
    }
}
