use chrono::NaiveDate;

use crate::models::{JobRecord, TrendPoint};

/// Inclusive date bounds for the trend view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Earliest and latest parseable posting dates.
pub fn date_bounds(subset: &[JobRecord]) -> Option<DateRange> {
    let start = subset.iter().filter_map(JobRecord::posted_date).min()?;
    let end = subset.iter().filter_map(JobRecord::posted_date).max()?;
    Some(DateRange { start, end })
}

/// Salary points sorted by posting date, each paired with the trailing mean
/// of `window` salaries. The first `window - 1` points have no average.
pub fn rolling_average(
    subset: &[JobRecord],
    window: usize,
    range: Option<DateRange>,
) -> Vec<TrendPoint> {
    let window = window.max(1);

    let mut points: Vec<(NaiveDate, f64)> = subset
        .iter()
        .filter_map(|job| Some((job.posted_date()?, job.salary?)))
        .filter(|(date, _)| range.map(|r| r.contains(*date)).unwrap_or(true))
        .collect();
    points.sort_by_key(|(date, _)| *date);

    let mut trend = Vec::with_capacity(points.len());
    let mut running = 0.0;
    for (i, &(date, salary)) in points.iter().enumerate() {
        running += salary;
        if i >= window {
            running -= points[i - window].1;
        }
        let rolling_avg = (i + 1 >= window).then(|| running / window as f64);
        trend.push(TrendPoint {
            date,
            salary,
            rolling_avg,
        });
    }

    trend
}
