use crate::core::items::{extract_entries, UnknownTitles};
use crate::domain::model::{CandidateEntry, Season, Year};
use crate::domain::ports::CanvasApi;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::sync::LazyLock;

static COURSE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/courses/([^/?#]+)").unwrap());

/// Course id from a Canvas course URL, e.g. `https://canvas.cmu.edu/courses/30096/modules` -> `30096`.
pub fn extract_course_id(url: &str) -> Result<String> {
    COURSE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| EtlError::CourseIdError {
            url: url.to_string(),
        })
}

/// Walks every module of one registry course and collects the syllabus
/// entries it links to.
pub struct RegistryTraversal<'a> {
    api: &'a dyn CanvasApi,
}

impl<'a> RegistryTraversal<'a> {
    pub fn new(api: &'a dyn CanvasApi) -> Self {
        Self { api }
    }

    /// Fails when the URL carries no course id or the module listing fails.
    /// A module whose items cannot be fetched is skipped.
    pub async fn syllabus_entries(
        &self,
        registry_url: &str,
        season: Season,
        year: Year,
    ) -> Result<Vec<CandidateEntry>> {
        let course_id = extract_course_id(registry_url)?;
        let modules = self.api.list_modules(&course_id).await?;
        tracing::debug!(
            "Registry {} has {} modules",
            registry_url,
            modules.len()
        );

        let mut entries = Vec::new();
        for module in &modules {
            let Some(items_url) = module.items_url.as_deref() else {
                continue;
            };

            tracing::debug!("Fetching items for module {:?} {}", module.id, module.name());
            let items = match self.api.list_items(items_url).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        "Skipping module {} of registry {}: {}",
                        module.name(),
                        registry_url,
                        e
                    );
                    continue;
                }
            };

            entries.extend(extract_entries(&items, season, year, UnknownTitles::Drop));
        }

        tracing::debug!(
            "Extracted {} syllabi from registry {}",
            entries.len(),
            registry_url
        );
        Ok(entries)
    }
}
