use crate::domain::model::{CourseRecord, Module, ModuleItem, SyllabusMap};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn registry_course_id(&self) -> u64;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn per_page(&self) -> usize;
    fn fallback_module_token(&self) -> Option<&str>;
}

/// Read access to the two Canvas resources the scraper walks.
#[async_trait]
pub trait CanvasApi: Send + Sync {
    /// `GET /api/v1/courses/{course_id}/modules`, all pages.
    async fn list_modules(&self, course_id: &str) -> Result<Vec<Module>>;

    /// `GET {items_url}`, all pages.
    async fn list_items(&self, items_url: &str) -> Result<Vec<ModuleItem>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SyllabusMap>;
    async fn transform(&self, map: SyllabusMap) -> Result<Vec<CourseRecord>>;
    async fn load(&self, records: Vec<CourseRecord>) -> Result<String>;
}
