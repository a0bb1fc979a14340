use crate::domain::model::DirEntryInfo;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolboxError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_file(&self, path: &str, data: &[u8]) {
        let path = PathBuf::from(path);
        self.add_parents(&path).await;
        self.files.lock().await.insert(path, data.to_vec());
    }

    pub async fn add_dir(&self, path: &str) {
        let path = PathBuf::from(path);
        self.add_parents(&path).await;
        self.dirs.lock().await.insert(path);
    }

    async fn add_parents(&self, path: &Path) {
        let mut dirs = self.dirs.lock().await;
        let mut current = path.parent();
        while let Some(dir) = current {
            if !dir.as_os_str().is_empty() {
                dirs.insert(dir.to_path_buf());
            }
            current = dir.parent();
        }
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(Path::new(path)).cloned()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| ToolboxError::FileNotFound {
                path: path.display().to_string(),
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.add_parents(path).await;
        let mut files = self.files.lock().await;
        files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>> {
        let files = self.files.lock().await;
        let dirs = self.dirs.lock().await;

        if files.contains_key(path) {
            return Err(ToolboxError::NotADirectory {
                path: path.display().to_string(),
            });
        }
        if !path.as_os_str().is_empty() && !dirs.contains(path) {
            return Err(ToolboxError::DirectoryNotFound {
                path: path.display().to_string(),
            });
        }

        let name_of = |p: &PathBuf| {
            p.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        let mut entries: Vec<DirEntryInfo> = files
            .keys()
            .filter(|p| parent_of(p) == path)
            .map(|p| DirEntryInfo::file(name_of(p)))
            .chain(
                dirs.iter()
                    .filter(|p| parent_of(p) == path)
                    .map(|p| DirEntryInfo::dir(name_of(p))),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn is_dir(&self, path: &Path) -> Result<bool> {
        if self.dirs.lock().await.contains(path) {
            return Ok(true);
        }
        if self.files.lock().await.contains_key(path) {
            return Ok(false);
        }
        Err(ToolboxError::FileNotFound {
            path: path.display().to_string(),
        })
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.files.lock().await.contains_key(path) || self.dirs.lock().await.contains(path))
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut files = self.files.lock().await;
        let data = files.remove(from).ok_or_else(|| ToolboxError::FileNotFound {
            path: from.display().to_string(),
        })?;
        files.insert(to.to_path_buf(), data);
        Ok(())
    }
}
