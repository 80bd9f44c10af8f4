use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::models::JobRecord;

pub const VALID_EXPERIENCE_LEVELS: [&str; 3] = ["Entry-Level", "Mid-Level", "Senior"];

pub const COMMON_SKILLS: [&str; 6] = [
    "DevOps",
    "AWS",
    "Azure",
    "Kubernetes",
    "GCP",
    "Machine Learning",
];

/// "City, ST"
pub const DEFAULT_LOCATION_PATTERN: &str = r"^[A-Za-z\s]+,\s[A-Z]{2}$";

static LOCATION_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_LOCATION_PATTERN).expect("default location pattern compiles")
});

#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub min_salary: f64,
    pub max_salary: f64,
    pub location_format: Regex,
}

impl ValidationRules {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            min_salary: config.min_valid_salary,
            max_salary: config.max_valid_salary,
            location_format: Regex::new(&config.location_pattern)?,
        })
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_salary: 50_000.0,
            max_salary: 250_000.0,
            location_format: LOCATION_FORMAT.clone(),
        }
    }
}

/// Offending record indices per rule. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_records: usize,
    pub invalid_salaries: Vec<usize>,
    pub invalid_experience: Vec<usize>,
    pub invalid_skills: Vec<usize>,
    pub invalid_locations: Vec<usize>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn issue_count(&self) -> usize {
        self.invalid_salaries.len()
            + self.invalid_experience.len()
            + self.invalid_skills.len()
            + self.invalid_locations.len()
    }
}

pub fn validate(records: &[JobRecord], rules: &ValidationRules) -> ValidationReport {
    let mut report = ValidationReport {
        total_records: records.len(),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        let salary_ok = record
            .salary
            .map(|s| s >= rules.min_salary && s <= rules.max_salary)
            .unwrap_or(false);
        if !salary_ok {
            report.invalid_salaries.push(index);
        }

        if !VALID_EXPERIENCE_LEVELS.contains(&record.experience.as_str()) {
            report.invalid_experience.push(index);
        }

        let has_common_skill = record
            .skills
            .as_deref()
            .map(|s| COMMON_SKILLS.iter().any(|skill| s.contains(skill)))
            .unwrap_or(false);
        if !has_common_skill {
            report.invalid_skills.push(index);
        }

        if !rules.location_format.is_match(&record.location) {
            report.invalid_locations.push(index);
        }
    }

    if !report.is_clean() {
        tracing::warn!(
            "Dataset validation found {} issues across {} records",
            report.issue_count(),
            report.total_records
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;

    #[test]
    fn test_clean_record() {
        let records = vec![sample_job(
            "Cloud Architect",
            "Seattle, WA",
            "Senior",
            150000.0,
            Some("AWS, Terraform"),
            "2024-01-15",
        )];
        let report = validate(&records, &ValidationRules::default());
        assert!(report.is_clean());
        assert_eq!(report.total_records, 1);
    }

    #[test]
    fn test_each_rule_flags_its_field() {
        let mut no_salary = sample_job("A", "Austin, TX", "Senior", 0.0, Some("AWS"), "2024-01-01");
        no_salary.salary = None;
        let records = vec![
            sample_job("A", "Austin, TX", "Senior", 300000.0, Some("AWS"), "2024-01-01"),
            sample_job("B", "Austin, TX", "Principal", 100000.0, Some("GCP"), "2024-01-01"),
            sample_job("C", "Austin, TX", "Senior", 100000.0, Some("aws, Rust"), "2024-01-01"),
            sample_job("D", "Austin", "Senior", 100000.0, Some("Azure"), "2024-01-01"),
            no_salary,
        ];
        let report = validate(&records, &ValidationRules::default());
        assert_eq!(report.invalid_salaries, vec![0, 4]);
        assert_eq!(report.invalid_experience, vec![1]);
        // Common-skill check is case-sensitive.
        assert_eq!(report.invalid_skills, vec![2]);
        assert_eq!(report.invalid_locations, vec![3]);
        assert_eq!(report.issue_count(), 5);
    }

    #[test]
    fn test_salary_bounds_are_inclusive() {
        let records = vec![
            sample_job("A", "Austin, TX", "Senior", 50000.0, Some("AWS"), "2024-01-01"),
            sample_job("B", "Austin, TX", "Senior", 250000.0, Some("AWS"), "2024-01-01"),
        ];
        let report = validate(&records, &ValidationRules::default());
        assert!(report.invalid_salaries.is_empty());
    }

    #[test]
    fn test_rules_from_config() {
        let config = Config {
            location_pattern: r"^[A-Z]{2}$".to_string(),
            ..Config::default()
        };
        let rules = ValidationRules::from_config(&config).unwrap();
        let records = vec![sample_job("A", "NY", "Senior", 100000.0, Some("AWS"), "2024-01-01")];
        assert!(validate(&records, &rules).invalid_locations.is_empty());

        let config = Config {
            location_pattern: "([unclosed".to_string(),
            ..Config::default()
        };
        let err = ValidationRules::from_config(&config).unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidPattern(_)));
    }
}
