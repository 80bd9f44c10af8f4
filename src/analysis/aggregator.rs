use std::collections::{BTreeMap, HashMap};

use crate::models::{
    AnalyticsView, DashboardSummary, GroupAverage, JobRecord, MonthlyAverage, NameCount,
    SalaryDomain, TitleCount,
};

// Every function here recomputes from the subset it is handed; nothing is cached.

/// Running sum/count for one group. Records without a salary do not count.
#[derive(Debug, Default, Clone, Copy)]
struct SalaryAccumulator {
    sum: f64,
    count: usize,
}

impl SalaryAccumulator {
    fn push(&mut self, salary: Option<f64>) {
        if let Some(salary) = salary {
            self.sum += salary;
            self.count += 1;
        }
    }

    /// Whole-dollar mean; 0 when nothing was pushed.
    fn mean(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        (self.sum / self.count as f64).round() as u64
    }
}

pub fn average_salary(subset: &[JobRecord]) -> u64 {
    let mut acc = SalaryAccumulator::default();
    for job in subset {
        acc.push(job.salary);
    }
    acc.mean()
}

/// Location with the most postings. Ties go to the alphabetically first name.
pub fn top_location(subset: &[JobRecord]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for job in subset {
        *counts.entry(job.location.as_str()).or_insert(0) += 1;
    }

    // BTreeMap iterates in ascending key order; keep the first maximum seen.
    let mut best: Option<(&str, usize)> = None;
    for (location, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((location, count)),
        }
    }

    best.map(|(location, _)| location.to_string())
}

/// Sorted by descending count, then title.
pub fn jobs_by_title(subset: &[JobRecord]) -> Vec<TitleCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for job in subset {
        *counts.entry(job.title.as_str()).or_insert(0) += 1;
    }

    let mut result: Vec<TitleCount> = counts
        .into_iter()
        .map(|(title, jobs)| TitleCount {
            title: title.to_string(),
            jobs,
        })
        .collect();
    result.sort_by(|a, b| b.jobs.cmp(&a.jobs).then_with(|| a.title.cmp(&b.title)));
    result
}

fn average_by<F>(subset: &[JobRecord], key: F) -> Vec<GroupAverage>
where
    F: Fn(&JobRecord) -> Option<String>,
{
    let mut groups: BTreeMap<String, SalaryAccumulator> = BTreeMap::new();
    for job in subset {
        if let Some(k) = key(job) {
            groups.entry(k).or_default().push(job.salary);
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| GroupAverage {
            key,
            avg: acc.mean(),
        })
        .collect()
}

pub fn average_salary_by_location(subset: &[JobRecord]) -> Vec<GroupAverage> {
    average_by(subset, |job| Some(job.location.clone()))
}

pub fn average_salary_by_title(subset: &[JobRecord]) -> Vec<GroupAverage> {
    average_by(subset, |job| Some(job.title.clone()))
}

/// Ascending by `YYYY-MM`. Records whose posting date does not parse are left out.
pub fn average_salary_by_month(subset: &[JobRecord]) -> Vec<MonthlyAverage> {
    let skipped = subset.iter().filter(|j| j.month_key().is_none()).count();
    if skipped > 0 {
        tracing::debug!("{} records without a parseable posting date", skipped);
    }

    average_by(subset, JobRecord::month_key)
        .into_iter()
        .map(|g| MonthlyAverage {
            month: g.key,
            avg: g.avg,
        })
        .collect()
}

/// Y-axis bounds for the monthly trend chart; `None` hides the chart.
pub fn salary_domain(monthly: &[MonthlyAverage]) -> Option<SalaryDomain> {
    let min = monthly.iter().map(|m| m.avg).min()?;
    let max = monthly.iter().map(|m| m.avg).max()?;
    Some(SalaryDomain { min, max })
}

/// Length of the analytics tab's best-paying locations chart.
pub const TOP_SALARY_LOCATIONS: usize = 10;

/// Highest-paying locations first.
pub fn top_locations_by_salary(subset: &[JobRecord], n: usize) -> Vec<GroupAverage> {
    let mut averages = average_salary_by_location(subset);
    // Stable sort keeps ties in location order.
    averages.sort_by(|a, b| b.avg.cmp(&a.avg));
    averages.truncate(n);
    averages
}

/// Most requested skills, descending count then name.
pub fn skill_demand(subset: &[JobRecord], n: usize) -> Vec<NameCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for job in subset {
        for skill in job.skill_list() {
            *counts.entry(skill).or_insert(0) += 1;
        }
    }
    ranked(counts, n)
}

pub fn experience_distribution(subset: &[JobRecord]) -> Vec<NameCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for job in subset {
        *counts.entry(job.experience.as_str()).or_insert(0) += 1;
    }
    ranked(counts, usize::MAX)
}

fn ranked(counts: HashMap<&str, usize>, n: usize) -> Vec<NameCount> {
    let mut result: Vec<NameCount> = counts
        .into_iter()
        .map(|(name, count)| NameCount {
            name: name.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    result.truncate(n);
    result
}

pub fn summarize(subset: &[JobRecord]) -> DashboardSummary {
    DashboardSummary {
        total_jobs: subset.len(),
        average_salary: average_salary(subset),
        top_location: top_location(subset),
        jobs_by_title: jobs_by_title(subset),
        experience_distribution: experience_distribution(subset),
    }
}

pub fn analytics(subset: &[JobRecord]) -> AnalyticsView {
    let by_month = average_salary_by_month(subset);
    let domain = salary_domain(&by_month);
    AnalyticsView {
        by_title: average_salary_by_title(subset),
        by_location: average_salary_by_location(subset),
        by_month,
        domain,
        top_locations_by_salary: top_locations_by_salary(subset, TOP_SALARY_LOCATIONS),
    }
}
