use crate::core::builder::SyllabusMapBuilder;
use crate::core::export::{export, to_json};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{CourseRecord, SyllabusMap};
use crate::domain::ports::CanvasApi;
use crate::utils::error::Result;

/// Scrapes the registry course into a syllabus map, exports it per course
/// and writes the JSON file through `storage`.
pub struct SyllabusPipeline<S: Storage, C: ConfigProvider, A: CanvasApi> {
    storage: S,
    config: C,
    api: A,
}

impl<S: Storage, C: ConfigProvider, A: CanvasApi> SyllabusPipeline<S, C, A> {
    pub fn new(storage: S, config: C, api: A) -> Self {
        Self {
            storage,
            config,
            api,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, A: CanvasApi> Pipeline for SyllabusPipeline<S, C, A> {
    async fn extract(&self) -> Result<SyllabusMap> {
        tracing::debug!(
            "Scraping registry course {} at {}",
            self.config.registry_course_id(),
            self.config.base_url()
        );

        let builder = SyllabusMapBuilder::new(&self.api, self.config.registry_course_id())
            .with_fallback_token(self.config.fallback_module_token());
        let (map, stats) = builder.build().await?;

        tracing::info!(
            "Visited {} combinations ({} without registry links, {} failed)",
            stats.combinations_in_scope,
            stats.combinations_without_links,
            stats.combinations_failed
        );
        tracing::info!(
            "Traversed {} registries, skipped {}; folded {} entries with {} overwrites",
            stats.registries_traversed,
            stats.registries_skipped,
            stats.entries_folded,
            stats.overwrites
        );

        Ok(map)
    }

    async fn transform(&self, map: SyllabusMap) -> Result<Vec<CourseRecord>> {
        let records = export(&map);
        tracing::debug!(
            "Grouped {} syllabi into {} courses",
            map.len(),
            records.len()
        );
        Ok(records)
    }

    async fn load(&self, records: Vec<CourseRecord>) -> Result<String> {
        let file_name = self.config.output_file();
        let output_path = format!("{}/{}", self.config.output_path(), file_name);

        let json = to_json(&records)?;
        tracing::debug!("Writing {} bytes to {}", json.len(), output_path);
        self.storage.write_file(file_name, json.as_bytes()).await?;

        Ok(output_path)
    }
}
