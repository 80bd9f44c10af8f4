use crate::dataset::validation::DEFAULT_LOCATION_PATTERN;
use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: String,
    pub page_size: usize,
    pub top_skills: usize,
    pub rolling_window: usize,
    pub min_valid_salary: f64,
    pub max_valid_salary: f64,
    pub location_pattern: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dataset_path = env::var("JOBMARKET_DATASET")
            .unwrap_or_else(|_| "data/jobData.json".to_string());

        let page_size = parse_var("JOBMARKET_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(Error::Config(
                "JOBMARKET_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        let top_skills = parse_var("JOBMARKET_TOP_SKILLS", 10)?;
        let rolling_window = parse_var("JOBMARKET_ROLLING_WINDOW", 7)?;
        let min_valid_salary = parse_var("JOBMARKET_MIN_SALARY", 50_000.0)?;
        let max_valid_salary = parse_var("JOBMARKET_MAX_SALARY", 250_000.0)?;

        if min_valid_salary > max_valid_salary {
            return Err(Error::Config(format!(
                "JOBMARKET_MIN_SALARY ({}) exceeds JOBMARKET_MAX_SALARY ({})",
                min_valid_salary, max_valid_salary
            )));
        }

        let location_pattern = env::var("JOBMARKET_LOCATION_PATTERN")
            .unwrap_or_else(|_| DEFAULT_LOCATION_PATTERN.to_string());

        Ok(Self {
            dataset_path,
            page_size,
            top_skills,
            rolling_window,
            min_valid_salary,
            max_valid_salary,
            location_pattern,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: "data/jobData.json".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            top_skills: 10,
            rolling_window: 7,
            min_valid_salary: 50_000.0,
            max_valid_salary: 250_000.0,
            location_pattern: DEFAULT_LOCATION_PATTERN.to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

/// Settings the view controller needs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub page_size: usize,
    pub top_skills: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            top_skills: 10,
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            top_skills: config.top_skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_from_config() {
        let config = Config {
            page_size: 20,
            top_skills: 3,
            ..Config::default()
        };
        let engine = EngineConfig::from(&config);
        assert_eq!(engine.page_size, 20);
        assert_eq!(engine.top_skills, 3);
    }

    #[test]
    fn test_default_page_size() {
        assert_eq!(Config::default().page_size, 15);
        assert_eq!(EngineConfig::default().page_size, 15);
    }
}
