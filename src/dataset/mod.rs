pub mod export;
pub mod loader;
pub mod validation;

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::JobRecord;

pub use export::{to_csv, write_csv};
pub use loader::{DatasetSource, InMemorySource, JsonFileSource};
pub use validation::{validate, ValidationReport, ValidationRules};

/// The immutable base collection every derived view is computed from.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[JobRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub async fn load(source: &dyn DatasetSource) -> Result<Self> {
        let records = source.load().await?;
        tracing::info!(
            "Loaded {} job records from {}",
            records.len(),
            source.describe()
        );
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct skill names in first-seen order.
    pub fn skills(&self) -> Vec<String> {
        distinct(self.records.iter().flat_map(|r| r.skill_list()))
    }

    pub fn locations(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.location.as_str()))
    }

    pub fn experience_levels(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.experience.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
