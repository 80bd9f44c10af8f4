use crate::models::{FilterSelection, JobRecord};

/// Produces the retained subset of `dataset` for `selection`.
///
/// Always starts from the slice it is given and never mutates it, so
/// recomputing from the base dataset can never compound stale filters.
/// Order of the input is preserved.
pub fn filter(dataset: &[JobRecord], selection: &FilterSelection) -> Vec<JobRecord> {
    let folded_skills: Vec<String> = selection
        .skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let retained: Vec<JobRecord> = dataset
        .iter()
        .filter(|job| retains(job, &folded_skills, selection))
        .cloned()
        .collect();

    tracing::debug!(
        "Filter retained {} of {} records",
        retained.len(),
        dataset.len()
    );

    retained
}

/// Whether a single record passes every constraint of `selection`.
pub fn matches(job: &JobRecord, selection: &FilterSelection) -> bool {
    let folded_skills: Vec<String> = selection
        .skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    retains(job, &folded_skills, selection)
}

fn retains(job: &JobRecord, folded_skills: &[String], selection: &FilterSelection) -> bool {
    if !folded_skills.is_empty() {
        // Loose substring match: "java" is satisfied by "JavaScript".
        let Some(haystack) = job.skills_folded() else {
            return false;
        };
        if !folded_skills.iter().all(|skill| haystack.contains(skill.as_str())) {
            return false;
        }
    }

    if let Some(ref location) = selection.location {
        if job.location != *location {
            return false;
        }
    }

    if let Some(ref experience) = selection.experience {
        if job.experience != *experience {
            return false;
        }
    }

    if let Some(range) = selection.salary_range {
        match job.salary {
            Some(salary) if range.contains(salary) => {}
            _ => return false,
        }
    }

    true
}
