use crate::domain::model::{Season, Term, Year};

/// First term that is scraped. Everything from this term onward is in scope.
pub const SCOPE_CUTOFF: Term = Term::new(Season::Fall, Year::new(2022));

/// `F22`, `S23`, `Su24`.
pub fn term_code(season: Season, year: Year) -> String {
    let prefix = match season {
        Season::Fall => "F",
        Season::Spring => "S",
        Season::Summer => "Su",
    };
    format!("{}{:02}", prefix, year.value().rem_euclid(100))
}

pub fn in_scope(season: Season, year: Year) -> bool {
    Term::new(season, year) >= SCOPE_CUTOFF
}
