use serde::{Deserialize, Serialize};

/// Inclusive salary bounds in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && salary <= self.max
    }
}

/// The active set of user-chosen constraints. Unset fields impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Every skill must appear (case-insensitive substring) in the record's skills.
    pub skills: Vec<String>,
    /// Exact, case-sensitive match on the record's location.
    pub location: Option<String>,
    /// Exact match on the record's experience level.
    pub experience: Option<String>,
    pub salary_range: Option<SalaryRange>,
}

impl FilterSelection {
    pub fn with_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.location.is_none()
            && self.experience.is_none()
            && self.salary_range.is_none()
    }
}

/// Treats empty strings from select boxes as "no constraint".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
