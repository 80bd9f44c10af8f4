use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jobmarket::analysis::simulator::DEFAULT_SKILLS_TO_LEARN;
use jobmarket::analysis::{read_resume, rolling_average, simulate, DateRange};
use jobmarket::dataset::{to_csv, validate, ValidationReport, ValidationRules};
use jobmarket::models::{
    AnalyticsView, CareerEstimate, DashboardSummary, JobRecord, NameCount, SalaryRange,
    TrendPoint,
};
use jobmarket::view::PageWindow;
use jobmarket::{Action, Config, Controller, Dataset, EngineConfig, Error, JsonFileSource, Tab};

#[derive(Parser, Debug)]
#[command(name = "jobmarket")]
#[command(version = "0.1.0")]
#[command(about = "Explore a job market dataset by skill, location and experience")]
struct Args {
    /// Dataset JSON file (overrides JOBMARKET_DATASET)
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// Output format (json, text, markdown, csv)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Jobs per page (overrides JOBMARKET_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline numbers and job counts by title
    Dashboard(FilterArgs),
    /// Average salary by title, location and month
    Analytics(FilterArgs),
    /// Paginated list of matching jobs
    Jobs {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Match a plain-text resume against the known skills
    Resume {
        file: String,
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Most requested skills among matching jobs
    Skills {
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of skills to list (overrides JOBMARKET_TOP_SKILLS)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Rolling average salary over posting date
    Trends {
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Estimate salary and skills to learn for a target role
    Simulate {
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long)]
        experience: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = DEFAULT_SKILLS_TO_LEARN)]
        top: usize,
    },
    /// Field-level data quality report
    Validate,
    /// What this tool is
    About,
}

#[derive(ClapArgs, Debug, Default)]
struct FilterArgs {
    /// Required skill (repeatable, case-insensitive substring)
    #[arg(long = "skill")]
    skills: Vec<String>,
    /// Exact location
    #[arg(long)]
    location: Option<String>,
    /// Exact experience level
    #[arg(long)]
    experience: Option<String>,
    #[arg(long)]
    min_salary: Option<f64>,
    #[arg(long)]
    max_salary: Option<f64>,
}

impl FilterArgs {
    fn actions(&self) -> Vec<Action> {
        let mut actions = vec![
            Action::SetSkills(self.skills.clone()),
            Action::SetLocation(self.location.clone()),
            Action::SetExperience(self.experience.clone()),
        ];
        if self.min_salary.is_some() || self.max_salary.is_some() {
            let range = SalaryRange::new(
                self.min_salary.unwrap_or(0.0),
                self.max_salary.unwrap_or(f64::MAX),
            );
            actions.push(Action::SetSalaryRange(Some(range)));
        }
        actions
    }
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
    /// Matching job records only; other reports are rejected.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct JobsReport<'a> {
    matched_skills: Option<Vec<String>>,
    window: PageWindow,
    jobs: &'a [JobRecord],
    /// Every matching record, for CSV export.
    #[serde(skip)]
    matching: &'a [JobRecord],
}

#[derive(Serialize)]
#[serde(untagged)]
enum Report<'a> {
    Dashboard(DashboardSummary),
    Analytics(AnalyticsView),
    Jobs(JobsReport<'a>),
    Skills(Vec<NameCount>),
    Trends(Vec<TrendPoint>),
    Simulation(CareerEstimate),
    Validation(ValidationReport),
    About(&'static str),
}

const ABOUT: &str = "Job Market Analysis explores job postings by skill, location and \
experience level: headline numbers, salary breakdowns, skill demand, salary trends and \
resume-based job recommendations.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobmarket=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();
    let format: OutputFormat = args.format.parse()?;

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(ref path) = args.dataset {
        config.dataset_path = path.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size.max(1);
    }
    if let Command::Skills { top: Some(top), .. } = args.command {
        config.top_skills = top;
    }

    // Load dataset
    let dataset = Dataset::load(&JsonFileSource::new(&config.dataset_path)).await?;
    let mut controller = Controller::new(dataset, EngineConfig::from(&config));

    let output = match args.command {
        Command::Dashboard(ref filters) => {
            apply_filters(&mut controller, Tab::Dashboard, filters);
            render(&Report::Dashboard(controller.summary()), format)?
        }
        Command::Analytics(ref filters) => {
            apply_filters(&mut controller, Tab::Analytics, filters);
            render(&Report::Analytics(controller.analytics()), format)?
        }
        Command::Jobs { ref filters, page } => {
            apply_filters(&mut controller, Tab::Skill, filters);
            controller.dispatch(Action::GoToPage(page));
            let current = controller.current_page();
            render(
                &Report::Jobs(JobsReport {
                    matched_skills: None,
                    window: current.window,
                    jobs: current.jobs,
                    matching: controller.filtered(),
                }),
                format,
            )?
        }
        Command::Resume { ref file, page } => {
            controller.dispatch(Action::SelectTab(Tab::Resume));
            let text = read_resume(file).await?;
            let matched = controller.apply_resume(&text);
            controller.dispatch(Action::GoToPage(page));
            let current = controller.current_page();
            render(
                &Report::Jobs(JobsReport {
                    matched_skills: Some(matched),
                    window: current.window,
                    jobs: current.jobs,
                    matching: controller.filtered(),
                }),
                format,
            )?
        }
        Command::Skills { ref filters, .. } => {
            apply_filters(&mut controller, Tab::Skill, filters);
            render(&Report::Skills(controller.skill_demand()), format)?
        }
        Command::Trends { window, from, to } => {
            let window = window.unwrap_or(config.rolling_window);
            let records = controller.dataset().records();
            let range = match (from, to) {
                (None, None) => None,
                (start, end) => {
                    let bounds = jobmarket::analysis::trends::date_bounds(records);
                    match (start.or(bounds.map(|b| b.start)), end.or(bounds.map(|b| b.end))) {
                        (Some(start), Some(end)) => Some(DateRange { start, end }),
                        _ => None,
                    }
                }
            };
            render(&Report::Trends(rolling_average(records, window, range)), format)?
        }
        Command::Simulate {
            ref skills,
            ref experience,
            ref location,
            top,
        } => {
            let estimate = simulate(
                controller.dataset().records(),
                skills,
                experience,
                location,
                top,
            );
            render(&Report::Simulation(estimate), format)?
        }
        Command::Validate => {
            let rules = ValidationRules::from_config(&config)?;
            let report = validate(controller.dataset().records(), &rules);
            render(&Report::Validation(report), format)?
        }
        Command::About => {
            controller.dispatch(Action::SelectTab(Tab::About));
            render(&Report::About(ABOUT), format)?
        }
    };

    // Output results
    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn apply_filters(controller: &mut Controller, tab: Tab, filters: &FilterArgs) {
    controller.dispatch(Action::SelectTab(tab));
    for action in filters.actions() {
        controller.dispatch(action);
    }
}

fn render(report: &Report<'_>, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => format_text(report),
        OutputFormat::Markdown => format_markdown(report),
        OutputFormat::Csv => match report {
            Report::Jobs(jobs) => to_csv(jobs.matching)?,
            _ => anyhow::bail!("csv output is only available for the jobs and resume commands"),
        },
    })
}

fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn salary_label(salary: Option<f64>) -> String {
    salary
        .map(|s| usd(s.round() as u64))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_text(report: &Report<'_>) -> String {
    let mut output = String::new();

    match report {
        Report::Dashboard(summary) => {
            output.push_str("\n=== Dashboard ===\n\n");
            output.push_str(&format!("Total Jobs: {}\n", summary.total_jobs));
            output.push_str(&format!("Avg Salary (USD): {}\n", usd(summary.average_salary)));
            output.push_str(&format!(
                "Top Location: {}\n",
                summary.top_location.as_deref().unwrap_or("-")
            ));
            if !summary.jobs_by_title.is_empty() {
                output.push_str("\nJobs by Title:\n");
                for entry in &summary.jobs_by_title {
                    output.push_str(&format!("  - {}: {}\n", entry.title, entry.jobs));
                }
            }
            if !summary.experience_distribution.is_empty() {
                output.push_str("\nJobs by Experience Level:\n");
                for level in &summary.experience_distribution {
                    output.push_str(&format!("  - {}: {}\n", level.name, level.count));
                }
            }
        }
        Report::Analytics(view) => {
            output.push_str("\n=== Analytics ===\n");
            output.push_str("\nAvg Salary by Job Title:\n");
            for group in &view.by_title {
                output.push_str(&format!("  - {}: {}\n", group.key, usd(group.avg)));
            }
            output.push_str("\nAvg Salary by Location:\n");
            for group in &view.by_location {
                output.push_str(&format!("  - {}: {}\n", group.key, usd(group.avg)));
            }
            output.push_str("\nTop Locations by Salary:\n");
            for group in &view.top_locations_by_salary {
                output.push_str(&format!("  - {}: {}\n", group.key, usd(group.avg)));
            }
            output.push_str("\nSalary Trend Over Time:\n");
            match view.domain {
                Some(domain) => {
                    output.push_str(&format!(
                        "  range {} .. {}\n",
                        usd(domain.min),
                        usd(domain.max)
                    ));
                    for point in &view.by_month {
                        output.push_str(&format!("  {}: {}\n", point.month, usd(point.avg)));
                    }
                }
                None => output.push_str("  (no dated postings)\n"),
            }
        }
        Report::Jobs(jobs) => {
            if let Some(ref matched) = jobs.matched_skills {
                output.push_str(&format!("\nMatched skills: {}\n", matched.join(", ")));
            }
            output.push_str(&format!(
                "\nRecommended Jobs ({} jobs found)\n\n",
                jobs.window.total_items
            ));
            if jobs.jobs.is_empty() {
                output.push_str("No matching jobs found. Try adjusting your filters.\n");
            }
            for job in jobs.jobs {
                output.push_str(&format!("{}\n", job.title));
                output.push_str(&format!("  {} • {}\n", job.company, job.location));
                output.push_str(&format!(
                    "  {} • {}\n",
                    salary_label(job.salary),
                    job.experience
                ));
                output.push_str(&format!(
                    "  Skills: {}\n",
                    job.skills.as_deref().unwrap_or("")
                ));
            }
            output.push_str(&format!(
                "\nPage {} of {}\n",
                jobs.window.page_index, jobs.window.total_pages
            ));
        }
        Report::Skills(demand) => {
            output.push_str("\nMost Required Skills:\n");
            for skill in demand {
                output.push_str(&format!("  - {}: {}\n", skill.name, skill.count));
            }
        }
        Report::Trends(points) => {
            output.push_str("\nSmoothed Salary Trend:\n");
            for point in points {
                let avg = point
                    .rolling_avg
                    .map(|a| usd(a.round() as u64))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "  {}  {}  avg {}\n",
                    point.date,
                    usd(point.salary.round() as u64),
                    avg
                ));
            }
        }
        Report::Simulation(estimate) => {
            output.push_str(&format!(
                "\n{} in {}: {} matching jobs\n",
                estimate.experience, estimate.location, estimate.matching_jobs
            ));
            output.push_str(&format!(
                "Estimated Salary: {} USD\n",
                usd(estimate.estimated_salary)
            ));
            if !estimate.skills_to_learn.is_empty() {
                output.push_str(&format!(
                    "Skills to Learn for Higher Pay: {}\n",
                    estimate.skills_to_learn.join(", ")
                ));
            }
        }
        Report::Validation(report) => {
            output.push_str("\nData Validation Summary:\n");
            output.push_str(&format!("Records: {}\n", report.total_records));
            output.push_str(&format!("Invalid Salaries: {}\n", report.invalid_salaries.len()));
            output.push_str(&format!(
                "Invalid Experience Levels: {}\n",
                report.invalid_experience.len()
            ));
            output.push_str(&format!("Invalid Skills: {}\n", report.invalid_skills.len()));
            output.push_str(&format!("Invalid Locations: {}\n", report.invalid_locations.len()));
        }
        Report::About(text) => {
            output.push_str(&format!("\n{}\n", text));
        }
    }

    output
}

fn format_markdown(report: &Report<'_>) -> String {
    let mut output = String::new();

    match report {
        Report::Dashboard(summary) => {
            output.push_str("# Dashboard\n\n");
            output.push_str("| Metric | Value |\n|--------|-------|\n");
            output.push_str(&format!("| Total Jobs | {} |\n", summary.total_jobs));
            output.push_str(&format!("| Avg Salary (USD) | {} |\n", usd(summary.average_salary)));
            output.push_str(&format!(
                "| Top Location | {} |\n",
                summary.top_location.as_deref().unwrap_or("-")
            ));
            output.push_str("\n## Jobs by Title\n\n| Title | Jobs |\n|-------|------|\n");
            for entry in &summary.jobs_by_title {
                output.push_str(&format!("| {} | {} |\n", entry.title, entry.jobs));
            }
            output.push_str("\n## Jobs by Experience Level\n\n| Level | Jobs |\n|-------|------|\n");
            for level in &summary.experience_distribution {
                output.push_str(&format!("| {} | {} |\n", level.name, level.count));
            }
        }
        Report::Analytics(view) => {
            output.push_str("# Analytics\n\n## Avg Salary by Job Title\n\n");
            output.push_str("| Title | Avg Salary |\n|-------|------------|\n");
            for group in &view.by_title {
                output.push_str(&format!("| {} | {} |\n", group.key, usd(group.avg)));
            }
            output.push_str("\n## Avg Salary by Location\n\n");
            output.push_str("| Location | Avg Salary |\n|----------|------------|\n");
            for group in &view.by_location {
                output.push_str(&format!("| {} | {} |\n", group.key, usd(group.avg)));
            }
            output.push_str("\n## Top Locations by Salary\n\n");
            output.push_str("| Location | Avg Salary |\n|----------|------------|\n");
            for group in &view.top_locations_by_salary {
                output.push_str(&format!("| {} | {} |\n", group.key, usd(group.avg)));
            }
            if !view.by_month.is_empty() {
                output.push_str("\n## Salary Trend Over Time\n\n");
                output.push_str("| Month | Avg Salary |\n|-------|------------|\n");
                for point in &view.by_month {
                    output.push_str(&format!("| {} | {} |\n", point.month, usd(point.avg)));
                }
            }
        }
        Report::Jobs(jobs) => {
            output.push_str(&format!(
                "# Recommended Jobs ({} found)\n\n",
                jobs.window.total_items
            ));
            if let Some(ref matched) = jobs.matched_skills {
                output.push_str(&format!("**Matched skills:** {}\n\n", matched.join(", ")));
            }
            output.push_str("| Title | Company | Location | Salary | Experience | Skills |\n");
            output.push_str("|-------|---------|----------|--------|------------|--------|\n");
            for job in jobs.jobs {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    job.title,
                    job.company,
                    job.location,
                    salary_label(job.salary),
                    job.experience,
                    job.skills.as_deref().unwrap_or("")
                ));
            }
            output.push_str(&format!(
                "\n*Page {} of {}*\n",
                jobs.window.page_index, jobs.window.total_pages
            ));
        }
        Report::Skills(demand) => {
            output.push_str("# Most Required Skills\n\n| Skill | Count |\n|-------|-------|\n");
            for skill in demand {
                output.push_str(&format!("| {} | {} |\n", skill.name, skill.count));
            }
        }
        Report::Trends(points) => {
            output.push_str("# Smoothed Salary Trend\n\n");
            output.push_str("| Date | Salary | Rolling Avg |\n|------|--------|-------------|\n");
            for point in points {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    point.date,
                    usd(point.salary.round() as u64),
                    point
                        .rolling_avg
                        .map(|a| usd(a.round() as u64))
                        .unwrap_or_default()
                ));
            }
        }
        Report::Simulation(estimate) => {
            output.push_str("# Career Simulator\n\n");
            output.push_str(&format!(
                "**{} in {}:** {} ({} matching jobs)\n",
                estimate.experience,
                estimate.location,
                usd(estimate.estimated_salary),
                estimate.matching_jobs
            ));
            if !estimate.skills_to_learn.is_empty() {
                output.push_str("\n## Skills to Learn\n\n");
                for skill in &estimate.skills_to_learn {
                    output.push_str(&format!("- {}\n", skill));
                }
            }
        }
        Report::Validation(report) => {
            output.push_str("# Data Validation Summary\n\n| Check | Failures |\n|-------|----------|\n");
            output.push_str(&format!("| Salary range | {} |\n", report.invalid_salaries.len()));
            output.push_str(&format!(
                "| Experience level | {} |\n",
                report.invalid_experience.len()
            ));
            output.push_str(&format!("| Common skills | {} |\n", report.invalid_skills.len()));
            output.push_str(&format!(
                "| Location format | {} |\n",
                report.invalid_locations.len()
            ));
        }
        Report::About(text) => {
            output.push_str(&format!("# About\n\n{}\n", text));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_defaults_to_library_skill_count() {
        let args = Args::try_parse_from([
            "jobmarket",
            "simulate",
            "--experience",
            "Senior",
            "--location",
            "NY",
        ])
        .unwrap();
        match args.command {
            Command::Simulate { top, .. } => assert_eq!(top, DEFAULT_SKILLS_TO_LEARN),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_skills_accepts_filters() {
        let args = Args::try_parse_from([
            "jobmarket", "skills", "--location", "NY", "--skill", "aws", "--top", "3",
        ])
        .unwrap();
        match args.command {
            Command::Skills { filters, top } => {
                assert_eq!(filters.location.as_deref(), Some("NY"));
                assert_eq!(filters.skills, vec!["aws"]);
                assert_eq!(top, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_csv_only_renders_job_lists() {
        let format: OutputFormat = "CSV".parse().unwrap();
        let report = Report::Jobs(JobsReport {
            matched_skills: None,
            window: PageWindow::new(0, 1, 15),
            jobs: &[],
            matching: &[],
        });
        assert_eq!(render(&report, format).unwrap(), "");
        assert!(render(&Report::About(ABOUT), format).is_err());
    }
}
