use crate::core::term::term_code;
use crate::domain::model::{CourseRecord, SyllabusMap, SyllabusRecord};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Group the map by course number. Courses appear in the order their first
/// entry is met while iterating the map, syllabi in map order.
pub fn export(map: &SyllabusMap) -> Vec<CourseRecord> {
    let mut courses: Vec<CourseRecord> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (key, url) in map {
        let position = *index.entry(key.number.as_str()).or_insert_with(|| {
            courses.push(CourseRecord {
                id: key.number.clone(),
                name: String::new(),
                syllabi: Vec::new(),
            });
            courses.len() - 1
        });

        courses[position].syllabi.push(SyllabusRecord {
            term: term_code(key.season, key.year),
            section: key.section.clone(),
            instructors: Vec::new(),
            url: url.clone(),
        });
    }

    courses
}

pub fn to_json(records: &[CourseRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
