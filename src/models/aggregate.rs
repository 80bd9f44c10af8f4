use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCount {
    pub title: String,
    pub jobs: usize,
}

/// Average salary (whole dollars) for one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub key: String,
    pub avg: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month: String,
    pub avg: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDomain {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub salary: f64,
    /// `None` until a full window of postings has been seen.
    pub rolling_avg: Option<f64>,
}

/// Headline numbers for the dashboard tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_jobs: usize,
    pub average_salary: u64,
    pub top_location: Option<String>,
    pub jobs_by_title: Vec<TitleCount>,
    pub experience_distribution: Vec<NameCount>,
}

/// Chart series for the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub by_title: Vec<GroupAverage>,
    pub by_location: Vec<GroupAverage>,
    pub by_month: Vec<MonthlyAverage>,
    /// Hidden chart when `None`.
    pub domain: Option<SalaryDomain>,
    pub top_locations_by_salary: Vec<GroupAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerEstimate {
    pub experience: String,
    pub location: String,
    pub matching_jobs: usize,
    pub estimated_salary: u64,
    pub skills_to_learn: Vec<String>,
}
