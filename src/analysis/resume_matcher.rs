use std::path::Path;

use crate::analysis::filter_engine::filter;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{FilterSelection, JobRecord};

/// Infers a skill selection from free text by substring search.
///
/// Both sides are case-folded and there is no word-boundary check, so a
/// short skill like "Go" matches "Google". Precision is knowingly traded
/// for recall here.
pub struct ResumeMatcher {
    known_skills: Vec<String>,
}

impl ResumeMatcher {
    pub fn new(known_skills: Vec<String>) -> Self {
        Self { known_skills }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.skills())
    }

    pub fn known_skills(&self) -> &[String] {
        &self.known_skills
    }

    /// Known skills occurring anywhere in `text`, in vocabulary order.
    pub fn match_text(&self, text: &str) -> Vec<String> {
        match_skills(text, &self.known_skills)
    }

    /// The selection a successful match produces: only the matched skills,
    /// any prior location or experience constraint is dropped.
    pub fn selection_for(&self, text: &str) -> FilterSelection {
        FilterSelection::with_skills(self.match_text(text))
    }

    /// Matched skills plus the jobs requiring all of them.
    pub fn recommend(&self, dataset: &Dataset, text: &str) -> (Vec<String>, Vec<JobRecord>) {
        let selection = self.selection_for(text);
        let jobs = filter(dataset.records(), &selection);
        (selection.skills, jobs)
    }
}

pub fn match_skills(text: &str, known_skills: &[String]) -> Vec<String> {
    let folded = text.to_lowercase();
    let matched: Vec<String> = known_skills
        .iter()
        .filter(|skill| !skill.is_empty() && folded.contains(&skill.to_lowercase()))
        .cloned()
        .collect();

    tracing::info!(
        "Resume matched {} of {} known skills",
        matched.len(),
        known_skills.len()
    );

    matched
}

/// Reads an uploaded resume as text. Undecodable bytes are replaced rather
/// than rejected, so a binary file degrades to spurious or empty matches.
pub async fn read_resume(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    tracing::debug!("Read {} bytes of resume text from {}", bytes.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;
    use std::io::Write;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matched = match_skills("PYTHON developer", &skills(&["python", "Rust"]));
        assert_eq!(matched, vec!["python"]);
    }

    #[test]
    fn test_match_has_no_word_boundary() {
        let matched = match_skills("Worked at Google on search", &skills(&["Go", "AWS"]));
        assert_eq!(matched, vec!["Go"]);
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        assert!(match_skills("", &skills(&["AWS"])).is_empty());
        assert!(match_skills("anything", &skills(&[""])).is_empty());
    }

    #[test]
    fn test_recommend_drops_prior_constraints() {
        let dataset = Dataset::new(vec![
            sample_job("Cloud Architect", "NY", "Senior", 150000.0, Some("AWS,Terraform"), "2024-01-15"),
            sample_job("DevOps Engineer", "SF", "Mid-Level", 120000.0, Some("AWS,Kubernetes"), "2024-02-01"),
            sample_job("Data Engineer", "SF", "Senior", 130000.0, Some("Python,Spark"), "2024-02-03"),
        ]);
        let matcher = ResumeMatcher::from_dataset(&dataset);

        let selection = matcher.selection_for("Five years of aws experience");
        assert_eq!(selection.skills, vec!["AWS"]);
        assert_eq!(selection.location, None);
        assert_eq!(selection.experience, None);

        let (matched, jobs) = matcher.recommend(&dataset, "aws and terraform");
        assert_eq!(matched, vec!["AWS", "Terraform"]);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Cloud Architect");
    }

    #[tokio::test]
    async fn test_read_resume_decodes_lossily() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Kubernetes \xff\xfe expert").unwrap();

        let text = read_resume(file.path()).await.unwrap();
        assert!(text.contains("Kubernetes"));
        assert_eq!(
            match_skills(&text, &skills(&["kubernetes"])),
            vec!["kubernetes"]
        );
    }
}
