use crate::core::modules::ModuleTraversal;
use crate::core::registry::RegistryTraversal;
use crate::core::term::in_scope;
use crate::domain::model::{CandidateEntry, Department, Season, SyllabusMap, Year};
use crate::domain::ports::CanvasApi;
use crate::utils::error::{EtlError, Result};

/// Every (department, season, year), department-major, in `all()` order.
pub fn generate_combinations() -> Vec<(Department, Season, Year)> {
    let years = Year::all();
    let mut combinations =
        Vec::with_capacity(Department::all().len() * Season::all().len() * years.len());

    for department in Department::all() {
        for season in Season::all() {
            for year in &years {
                combinations.push((department, season, *year));
            }
        }
    }

    combinations
}

/// Counters for one build, logged at the end of extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub combinations_in_scope: usize,
    pub combinations_without_links: usize,
    pub combinations_failed: usize,
    pub registries_traversed: usize,
    pub registries_skipped: usize,
    pub entries_folded: usize,
    pub overwrites: usize,
}

/// Insert entries in order; a later entry replaces an earlier one with the
/// same (year, season, number, section).
pub fn fold_entries(
    map: &mut SyllabusMap,
    entries: impl IntoIterator<Item = CandidateEntry>,
    stats: &mut BuildStats,
) {
    for entry in entries {
        let key = entry.key();
        if map.insert(key, entry.url).is_some() {
            stats.overwrites += 1;
        }
        stats.entries_folded += 1;
    }
}

pub struct SyllabusMapBuilder<'a> {
    modules: ModuleTraversal<'a>,
    registries: RegistryTraversal<'a>,
}

impl<'a> SyllabusMapBuilder<'a> {
    pub fn new(api: &'a dyn CanvasApi, registry_course_id: u64) -> Self {
        Self {
            modules: ModuleTraversal::new(api, registry_course_id),
            registries: RegistryTraversal::new(api),
        }
    }

    pub fn with_fallback_token(mut self, token: Option<&'a str>) -> Self {
        self.modules = self.modules.with_fallback_token(token);
        self
    }

    pub async fn build(&self) -> Result<(SyllabusMap, BuildStats)> {
        self.build_for(&generate_combinations()).await
    }

    /// Walk the given combinations in order, skipping those before the
    /// scope cutoff. Recoverable failures only drop the unit of work they
    /// hit; anything else ends the build.
    pub async fn build_for(
        &self,
        combinations: &[(Department, Season, Year)],
    ) -> Result<(SyllabusMap, BuildStats)> {
        let mut map = SyllabusMap::new();
        let mut stats = BuildStats::default();

        for &(department, season, year) in combinations {
            if !in_scope(season, year) {
                continue;
            }
            stats.combinations_in_scope += 1;
            tracing::info!("Processing {} {} {}", department, season, year);

            let links = match self.modules.registry_links(department, season, year).await {
                Ok(Some(links)) => links,
                Ok(None) => {
                    tracing::info!("No registry links found for {} {} {}", department, season, year);
                    stats.combinations_without_links += 1;
                    continue;
                }
                Err(e) => {
                    let e = recoverable(e)?;
                    tracing::warn!(
                        "Registry lookup failed for {} {} {}: {}",
                        department,
                        season,
                        year,
                        e
                    );
                    stats.combinations_failed += 1;
                    continue;
                }
            };

            for link in &links {
                match self
                    .registries
                    .syllabus_entries(&link.url, season, year)
                    .await
                {
                    Ok(entries) => {
                        stats.registries_traversed += 1;
                        fold_entries(&mut map, entries, &mut stats);
                    }
                    Err(e) => {
                        let e = recoverable(e)?;
                        tracing::warn!("Skipping registry {}: {}", link.url, e);
                        stats.registries_skipped += 1;
                    }
                }
            }
        }

        Ok((map, stats))
    }
}

fn recoverable(e: EtlError) -> Result<EtlError> {
    if e.is_recoverable() {
        Ok(e)
    } else {
        Err(e)
    }
}
