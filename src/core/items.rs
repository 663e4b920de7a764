use crate::core::title::parse_title;
use crate::domain::model::{CandidateEntry, ModuleItem, Season, Year};

/// What to do with items whose title does not yield a course number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTitles {
    /// Keep them with the `unknown` number; the URL is still useful.
    Keep,
    Drop,
}

/// Turn module items into candidate entries for one term. Items without a
/// usable URL are always skipped.
pub fn extract_entries(
    items: &[ModuleItem],
    season: Season,
    year: Year,
    unknown: UnknownTitles,
) -> Vec<CandidateEntry> {
    items
        .iter()
        .filter_map(|item| {
            let title = item.title();
            let Some(url) = item.effective_url() else {
                tracing::debug!("Skipping item with empty URL: {}", title);
                return None;
            };

            let parsed = parse_title(title);
            if parsed.is_unknown() {
                tracing::debug!("Could not parse course number from: {}", title);
                if unknown == UnknownTitles::Drop {
                    return None;
                }
            }

            Some(CandidateEntry {
                season,
                year,
                number: parsed.number,
                section: parsed.section,
                url,
            })
        })
        .collect()
}
