use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Department whose syllabus registry is scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CS")]
    Cs,
    #[serde(rename = "MSC")]
    Msc,
    #[serde(rename = "MATH")]
    Math,
    #[serde(rename = "STAT")]
    Stat,
}

impl Department {
    pub const fn all() -> [Department; 4] {
        [
            Department::Cs,
            Department::Msc,
            Department::Math,
            Department::Stat,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::Cs => "CS",
            Department::Msc => "MSC",
            Department::Math => "MATH",
            Department::Stat => "STAT",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Fall,
    Spring,
    Summer,
}

impl Season {
    pub const fn all() -> [Season; 3] {
        [Season::Fall, Season::Spring, Season::Summer]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Season::Fall => "Fall",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
        }
    }

    /// Position within a calendar year: Spring, then Summer, then Fall.
    pub const fn calendar_rank(&self) -> u8 {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic year, e.g. `Year(2023)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl Year {
    pub const FIRST: Year = Year(2015);
    pub const LAST: Year = Year(2024);

    pub const fn new(value: i32) -> Self {
        Year(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Every year from `FIRST` to `LAST`, inclusive and ascending.
    pub fn all() -> Vec<Year> {
        (Self::FIRST.0..=Self::LAST.0).map(Year).collect()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (season, year) pair, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub season: Season,
    pub year: Year,
}

impl Term {
    pub const fn new(season: Season, year: Year) -> Self {
        Self { season, year }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.year
            .cmp(&other.year)
            .then(self.season.calendar_rank().cmp(&other.season.calendar_rank()))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// One parsed module item, before it is folded into the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub season: Season,
    pub year: Year,
    pub number: String,
    pub section: String,
    pub url: String,
}

impl CandidateEntry {
    pub fn key(&self) -> SyllabusKey {
        SyllabusKey {
            year: self.year,
            season: self.season,
            number: self.number.clone(),
            section: self.section.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyllabusKey {
    pub year: Year,
    pub season: Season,
    pub number: String,
    pub section: String,
}

/// (year, season, number, section) -> syllabus URL. Later inserts replace
/// earlier ones for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllabusMap {
    entries: BTreeMap<SyllabusKey, String>,
}

impl SyllabusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL that was replaced, if any.
    pub fn insert(&mut self, key: SyllabusKey, url: String) -> Option<String> {
        self.entries.insert(key, url)
    }

    pub fn get(&self, key: &SyllabusKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SyllabusKey, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SyllabusMap {
    type Item = (&'a SyllabusKey, &'a String);
    type IntoIter = btree_map::Iter<'a, SyllabusKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Exported course with every syllabus found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    pub syllabi: Vec<SyllabusRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusRecord {
    pub term: String,
    pub section: String,
    pub instructors: Vec<String>,
    pub url: String,
}

/// Entry of `GET /api/v1/courses/:id/modules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Only logged. Kept untyped so an odd id never rejects the page.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items_url: Option<String>,
}

impl Module {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Entry of a module's `items_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleItem {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
}

impl ModuleItem {
    pub const EXTERNAL_URL: &'static str = "ExternalUrl";

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// The link a reader would follow: `external_url` first for external
    /// links, then `html_url`, then the API `url`. Blank values are skipped.
    pub fn effective_url(&self) -> Option<String> {
        let external = if self.kind.as_deref() == Some(Self::EXTERNAL_URL) {
            self.external_url.as_deref()
        } else {
            None
        };

        [external, self.html_url.as_deref(), self.url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|c| !c.is_empty())
            .map(str::to_string)
    }
}
