use crate::domain::model::{DirEntryInfo, Outcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// 檔案存取介面，路徑皆相對於實作的根目錄（絕對路徑原樣使用）
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 依名稱排序；不存在時回傳 `DirectoryNotFound`
    fn list_dir(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<DirEntryInfo>>> + Send;
    fn is_dir(&self, path: &Path) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait PlanDescription {
    fn item_count(&self) -> usize;
    fn describe(&self) -> Vec<String>;
}

#[async_trait]
pub trait Tool: Send + Sync {
    type Plan: PlanDescription + Send;

    fn name(&self) -> &'static str;
    async fn plan(&self) -> Result<Self::Plan>;
    async fn apply(&self, plan: Self::Plan) -> Result<Outcome>;
}
