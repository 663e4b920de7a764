//! Course number extraction from free-text module item titles.
//!
//! Titles are file names and labels typed by many different course
//! administrators, so there is no single format. Parsing runs an ordered list
//! of rules and the first rule that produces a result wins:
//!
//! 1. department placeholder templates such as `(00XXX)`
//! 2. term-prefixed numbers such as `F25 00123`
//! 3. the first run of characters starting at a digit, split on `-` into a
//!    course number and section (`02701-A: ...`, `49-747_...`, `14513-syllabus-f18.pdf`)
//!
//! When nothing matches the title parses to [`UNKNOWN`] with an empty section.
//!
//! Every rule counts only ASCII `0-9` as a digit.

use regex::Regex;
use std::sync::LazyLock;

/// Course number used when a title cannot be parsed.
pub const UNKNOWN: &str = "unknown";

static PLACEHOLDER_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]{2,5}X+)\)").unwrap());

static TERM_PREFIXED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[FS][0-9]{2}\s+([0-9]{5})").unwrap());

/// Characters that end the course code part of a title.
const CODE_TERMINATORS: [char; 4] = [' ', '.', '_', ':'];

/// Trailing labels that describe the document rather than a section.
const DESCRIPTIVE_LABELS: [&str; 2] = ["objectives", "syllabus"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub number: String,
    pub section: String,
}

impl ParsedTitle {
    pub fn new(number: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            section: section.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN, "")
    }

    pub fn is_unknown(&self) -> bool {
        self.number == UNKNOWN
    }
}

/// A single title heuristic. `apply` returns `None` when the rule does not
/// recognise the title, letting the next rule try.
#[derive(Debug, Clone, Copy)]
pub struct TitleRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<ParsedTitle>,
}

/// Rules in priority order. New rules go at the end unless they must
/// pre-empt an existing one.
pub const RULES: &[TitleRule] = &[
    TitleRule {
        name: "placeholder_template",
        apply: placeholder_template,
    },
    TitleRule {
        name: "term_prefixed_number",
        apply: term_prefixed_number,
    },
    TitleRule {
        name: "delimited_code",
        apply: delimited_code,
    },
];

/// Parse a title into a course number and section. Never fails.
pub fn parse_title(title: &str) -> ParsedTitle {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(title))
        .unwrap_or_else(ParsedTitle::unknown)
}

/// `(Dept Name) (00XXX)` -> `00XXX`
fn placeholder_template(title: &str) -> Option<ParsedTitle> {
    let caps = PLACEHOLDER_TEMPLATE.captures(title)?;
    Some(ParsedTitle::new(caps.get(1)?.as_str(), ""))
}

/// `F25 00123` -> `00123`
fn term_prefixed_number(title: &str) -> Option<ParsedTitle> {
    let caps = TERM_PREFIXED_NUMBER.captures(title)?;
    Some(ParsedTitle::new(caps.get(1)?.as_str(), ""))
}

fn delimited_code(title: &str) -> Option<ParsedTitle> {
    let (start, _) = title.char_indices().find(|(_, c)| c.is_ascii_digit())?;
    let code = title[start..]
        .split(CODE_TERMINATORS)
        .next()
        .unwrap_or("");

    let parts: Vec<&str> = code.split('-').collect();
    match parts.as_slice() {
        [] | [""] => None,
        [number] => Some(ParsedTitle::new(*number, "")),
        [number, section] => {
            if number.chars().count() == 5 {
                Some(ParsedTitle::new(*number, *section))
            } else {
                // `49-747` style: the hyphen splits the number itself
                Some(ParsedTitle::new(format!("{}{}", number, section), ""))
            }
        }
        [number, label, third] => {
            let label_lower = label.to_lowercase();
            if DESCRIPTIVE_LABELS.contains(&label_lower.as_str()) {
                Some(ParsedTitle::new(*number, ""))
            } else {
                Some(ParsedTitle::new(format!("{}{}", number, label), *third))
            }
        }
        [first, second, rest @ ..] => Some(ParsedTitle::new(
            format!("{}{}", first, second),
            rest.join("-"),
        )),
    }
}
