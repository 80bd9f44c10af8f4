use std::collections::HashSet;

use crate::analysis::aggregator::{average_salary, skill_demand};
use crate::analysis::filter_engine::filter;
use crate::models::{CareerEstimate, FilterSelection, JobRecord};

pub const DEFAULT_SKILLS_TO_LEARN: usize = 5;

/// Estimates pay for an experience level and location, and lists the most
/// demanded skills the user does not have yet.
pub fn simulate(
    dataset: &[JobRecord],
    user_skills: &[String],
    experience: &str,
    location: &str,
    top_n: usize,
) -> CareerEstimate {
    let selection = FilterSelection {
        location: Some(location.to_string()),
        experience: Some(experience.to_string()),
        ..Default::default()
    };
    let peers = filter(dataset, &selection);

    let owned: HashSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
    let skills_to_learn = skill_demand(dataset, top_n)
        .into_iter()
        .map(|d| d.name)
        .filter(|name| !owned.contains(&name.to_lowercase()))
        .collect();

    CareerEstimate {
        experience: experience.to_string(),
        location: location.to_string(),
        matching_jobs: peers.len(),
        estimated_salary: average_salary(&peers),
        skills_to_learn,
    }
}
