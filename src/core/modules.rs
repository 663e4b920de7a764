use crate::core::items::{extract_entries, UnknownTitles};
use crate::domain::model::{CandidateEntry, Department, Module, Season, Year};
use crate::domain::ports::CanvasApi;
use crate::utils::error::Result;

/// Finds the registry links for one (department, season, year) in the
/// top-level syllabus registry course.
pub struct ModuleTraversal<'a> {
    api: &'a dyn CanvasApi,
    registry_course_id: u64,
    fallback_module_token: Option<&'a str>,
}

impl<'a> ModuleTraversal<'a> {
    pub fn new(api: &'a dyn CanvasApi, registry_course_id: u64) -> Self {
        Self {
            api,
            registry_course_id,
            fallback_module_token: None,
        }
    }

    /// Module name fragment to use when no module matches the term.
    pub fn with_fallback_token(mut self, token: Option<&'a str>) -> Self {
        self.fallback_module_token = token;
        self
    }

    /// `Err` when a request fails, `Ok(None)` when the registry has no
    /// usable module or no linkable items for the term.
    pub async fn registry_links(
        &self,
        department: Department,
        season: Season,
        year: Year,
    ) -> Result<Option<Vec<CandidateEntry>>> {
        let course_id = self.registry_course_id.to_string();
        let modules = self.api.list_modules(&course_id).await?;
        tracing::debug!(
            "{} {} {}: registry course {} has {} modules",
            department,
            season,
            year,
            course_id,
            modules.len()
        );

        let Some(module) = select_module(&modules, season, year, self.fallback_module_token)
        else {
            tracing::info!("No module matches '{}' '{}'", season, year);
            return Ok(None);
        };
        tracing::debug!("Using module {:?} {}", module.id, module.name());

        let Some(items_url) = module.items_url.as_deref() else {
            tracing::warn!("Module {} has no items_url", module.name());
            return Ok(None);
        };

        let items = self.api.list_items(items_url).await?;
        let links = extract_entries(&items, season, year, UnknownTitles::Keep);
        tracing::debug!(
            "Extracted {} registry links from {} items",
            links.len(),
            items.len()
        );

        Ok(if links.is_empty() { None } else { Some(links) })
    }
}

/// First module whose name mentions both the season and the year, else the
/// first module containing the fallback token.
pub fn select_module<'m>(
    modules: &'m [Module],
    season: Season,
    year: Year,
    fallback_token: Option<&str>,
) -> Option<&'m Module> {
    let season_str = season.as_str();
    let year_str = year.to_string();

    modules
        .iter()
        .find(|m| m.name().contains(season_str) && m.name().contains(&year_str))
        .or_else(|| {
            let token = fallback_token?;
            tracing::debug!("Trying fallback module token '{}'", token);
            modules.iter().find(|m| m.name().contains(token))
        })
}
