use crate::analysis::aggregator;
use crate::analysis::filter_engine::filter;
use crate::analysis::resume_matcher::ResumeMatcher;
use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::models::{AnalyticsView, DashboardSummary, JobRecord, NameCount};
use crate::view::paginator::{total_pages, PageWindow};
use crate::view::state::{reduce, Action, ViewState};

/// Owns the base dataset and the current state, and keeps the filtered
/// subset in step with the selection.
pub struct Controller {
    dataset: Dataset,
    matcher: ResumeMatcher,
    config: EngineConfig,
    state: ViewState,
    filtered: Vec<JobRecord>,
}

/// One rendered page of the job list.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPage<'a> {
    pub window: PageWindow,
    pub jobs: &'a [JobRecord],
}

impl Controller {
    pub fn new(dataset: Dataset, config: EngineConfig) -> Self {
        let matcher = ResumeMatcher::from_dataset(&dataset);
        let state = ViewState::default();
        let filtered = filter(dataset.records(), &state.selection);
        Self {
            dataset,
            matcher,
            config,
            state,
            filtered,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filtered(&self) -> &[JobRecord] {
        &self.filtered
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.config.page_size)
    }

    /// Applies `action`, recomputing the subset from the base dataset when
    /// the selection changed.
    pub fn dispatch(&mut self, action: Action) -> &ViewState {
        let next = reduce(&self.state, &action, self.total_pages());

        if next.selection != self.state.selection {
            self.filtered = filter(self.dataset.records(), &next.selection);
            tracing::debug!(
                "Selection changed, {} jobs now match",
                self.filtered.len()
            );
        }

        self.state = next;
        &self.state
    }

    /// Matches resume text against the dataset's skills and switches to the
    /// skill view. Each call supersedes the previous one.
    pub fn apply_resume(&mut self, text: &str) -> Vec<String> {
        let matched = self.matcher.match_text(text);
        self.dispatch(Action::ResumeMatched(matched.clone()));
        matched
    }

    pub fn summary(&self) -> DashboardSummary {
        aggregator::summarize(&self.filtered)
    }

    pub fn analytics(&self) -> AnalyticsView {
        aggregator::analytics(&self.filtered)
    }

    pub fn skill_demand(&self) -> Vec<NameCount> {
        aggregator::skill_demand(&self.filtered, self.config.top_skills)
    }

    pub fn current_page(&self) -> JobPage<'_> {
        let window = PageWindow::new(self.filtered.len(), self.state.page, self.config.page_size);
        JobPage {
            window,
            jobs: &self.filtered[window.range()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;
    use crate::models::FilterSelection;
    use crate::view::state::Tab;

    fn controller(jobs: usize) -> Controller {
        let records = (0..jobs)
            .map(|i| {
                let (location, skills) = if i % 2 == 0 {
                    ("NY", "AWS,Terraform")
                } else {
                    ("SF", "GCP,Python")
                };
                sample_job(
                    &format!("Job {}", i),
                    location,
                    "Senior",
                    100000.0 + i as f64,
                    Some(skills),
                    "2024-01-15",
                )
            })
            .collect();
        Controller::new(Dataset::new(records), EngineConfig::default())
    }

    #[test]
    fn test_starts_unfiltered_on_first_page() {
        let c = controller(40);
        assert_eq!(c.state(), &ViewState::default());
        assert_eq!(c.filtered().len(), 40);
        assert_eq!(c.total_pages(), 3);
        let page = c.current_page();
        assert_eq!(page.window.page_index, 1);
        assert_eq!(page.jobs.len(), 15);
    }

    #[test]
    fn test_filter_change_recomputes_and_resets_page() {
        let mut c = controller(40);
        c.dispatch(Action::GoToPage(3));
        assert_eq!(c.state().page, 3);

        c.dispatch(Action::SetLocation(Some("NY".to_string())));
        assert_eq!(c.state().page, 1);
        assert_eq!(c.filtered().len(), 20);
        assert!(c.filtered().iter().all(|j| j.location == "NY"));

        // Widening again recomputes from the base dataset.
        c.dispatch(Action::SetLocation(None));
        assert_eq!(c.filtered().len(), 40);
    }

    #[test]
    fn test_page_navigation_respects_current_result() {
        let mut c = controller(20);
        c.dispatch(Action::NextPage);
        c.dispatch(Action::NextPage);
        assert_eq!(c.state().page, 2);
        let page = c.current_page();
        assert_eq!(page.jobs.len(), 5);
        assert!(!page.window.has_next());
    }

    #[test]
    fn test_resume_flow_drops_location_and_experience() {
        let mut c = controller(10);
        c.dispatch(Action::SetLocation(Some("SF".to_string())));
        c.dispatch(Action::SetExperience(Some("Senior".to_string())));
        assert_eq!(c.filtered().len(), 5);

        let matched = c.apply_resume("Certified in terraform and aws");
        assert_eq!(matched, vec!["AWS", "Terraform"]);
        assert_eq!(c.state().tab, Tab::Skill);
        assert_eq!(
            c.state().selection,
            FilterSelection::with_skills(["AWS", "Terraform"])
        );
        assert_eq!(c.filtered().len(), 5);
        assert!(c.filtered().iter().all(|j| j.location == "NY"));
    }

    #[test]
    fn test_last_resolved_resume_wins() {
        let mut c = controller(10);
        c.apply_resume("python");
        c.apply_resume("aws");
        assert_eq!(c.state().selection.skills, vec!["AWS"]);
    }

    #[test]
    fn test_skill_demand_follows_selection() {
        let mut c = controller(10);
        c.dispatch(Action::SetLocation(Some("NY".to_string())));
        assert_eq!(
            c.skill_demand(),
            vec![
                NameCount { name: "AWS".to_string(), count: 5 },
                NameCount { name: "Terraform".to_string(), count: 5 },
            ]
        );

        let config = EngineConfig {
            top_skills: 1,
            ..EngineConfig::default()
        };
        let c = Controller::new(c.dataset().clone(), config);
        assert_eq!(c.skill_demand().len(), 1);
    }

    #[test]
    fn test_undated_record_still_counts_outside_date_series() {
        let mut undated = sample_job("Job X", "NY", "Senior", 90000.0, None, "2024-01-15");
        undated.posted = String::new();
        let records = vec![
            sample_job("Job Y", "NY", "Senior", 110000.0, None, "2024-01-15"),
            undated,
        ];
        let c = Controller::new(Dataset::new(records), EngineConfig::default());

        let summary = c.summary();
        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.average_salary, 100000);
        assert_eq!(c.current_page().jobs.len(), 2);
        assert_eq!(c.analytics().by_month[0].avg, 110000);
    }

    #[test]
    fn test_empty_result_summary_is_defined() {
        let mut c = controller(4);
        c.dispatch(Action::SetLocation(Some("LA".to_string())));
        let summary = c.summary();
        assert_eq!(summary.total_jobs, 0);
        assert_eq!(summary.average_salary, 0);
        assert_eq!(summary.top_location, None);
        assert_eq!(c.analytics().domain, None);
        assert!(c.current_page().jobs.is_empty());
        assert_eq!(c.current_page().window.page_index, 1);
    }
}
