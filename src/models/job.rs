use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// One job posting as shipped in the bundled dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Job_Title", default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(rename = "Company", default, deserialize_with = "deserialize_text")]
    pub company: String,
    #[serde(rename = "Location", default, deserialize_with = "deserialize_text")]
    pub location: String,
    #[serde(
        rename = "Experience_Level",
        default,
        deserialize_with = "deserialize_text"
    )]
    pub experience: String,
    #[serde(
        rename = "Salary_USD",
        default,
        deserialize_with = "deserialize_salary"
    )]
    pub salary: Option<f64>,
    #[serde(
        rename = "Skills",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub skills: Option<String>,
    #[serde(rename = "Date_Posted", default, deserialize_with = "deserialize_text")]
    pub posted: String,
}

impl JobRecord {
    /// Individual skill names, trimmed, empties dropped.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Case-folded skills field, `None` when the record has no skills.
    pub fn skills_folded(&self) -> Option<String> {
        self.skills.as_ref().map(|s| s.to_lowercase())
    }

    pub fn posted_date(&self) -> Option<NaiveDate> {
        parse_posted_date(&self.posted)
    }

    /// `YYYY-MM` key; lexical order equals chronological order.
    pub fn month_key(&self) -> Option<String> {
        self.posted_date().map(|d| d.format("%Y-%m").to_string())
    }
}

pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSalary {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_salary<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawSalary> = Option::deserialize(deserializer)?;
    let salary = match raw {
        Some(RawSalary::Number(n)) => Some(n),
        Some(RawSalary::Text(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        Some(RawSalary::Other(_)) | None => None,
    };
    Ok(salary.filter(|s| s.is_finite() && *s >= 0.0))
}

/// Text fields accept strings and numbers; `null` and anything else read as absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(f64),
    Other(IgnoredAny),
}

impl RawText {
    fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(s) => Some(s),
            RawText::Number(n) => Some(n.to_string()),
            RawText::Other(_) => None,
        }
    }
}

fn deserialize_optional_text<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawText> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(RawText::into_text))
}

fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn sample_job(
    title: &str,
    location: &str,
    experience: &str,
    salary: f64,
    skills: Option<&str>,
    posted: &str,
) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: location.to_string(),
        experience: experience.to_string(),
        salary: Some(salary),
        skills: skills.map(str::to_string),
        posted: posted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_bundled_shape() {
        let raw = r#"{
            "Job_Title": "Cloud Architect",
            "Company": "Acme",
            "Location": "Seattle, WA",
            "Experience_Level": "Senior",
            "Salary_USD": 150000,
            "Skills": "AWS, Terraform",
            "Date_Posted": "2024-01-15"
        }"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.title, "Cloud Architect");
        assert_eq!(record.salary, Some(150000.0));
        assert_eq!(record.skill_list(), vec!["AWS", "Terraform"]);
        assert_eq!(record.month_key(), Some("2024-01".to_string()));
    }

    #[test]
    fn test_salary_as_string_and_missing_skills() {
        let raw = r#"{"Job_Title": "SRE", "Salary_USD": "120,000", "Date_Posted": "2024-03-02"}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.salary, Some(120000.0));
        assert!(record.skills.is_none());
        assert!(record.skill_list().is_empty());
    }

    #[test]
    fn test_unusable_salary_becomes_none() {
        let raw = r#"{"Job_Title": "SRE", "Salary_USD": "n/a"}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.salary, None);

        let raw = r#"{"Job_Title": "SRE", "Salary_USD": -5}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.salary, None);

        let raw = r#"{"Job_Title": "SRE", "Salary_USD": null}"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.salary, None);
    }

    #[test]
    fn test_null_and_odd_text_fields_read_as_defaults() {
        let raw = r#"{
            "Job_Title": null,
            "Company": 3,
            "Location": null,
            "Experience_Level": ["Senior"],
            "Salary_USD": 90000,
            "Skills": {"primary": "AWS"},
            "Date_Posted": null
        }"#;
        let record: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.company, "3");
        assert_eq!(record.location, "");
        assert_eq!(record.experience, "");
        assert_eq!(record.salary, Some(90000.0));
        assert_eq!(record.skills, None);
        assert_eq!(record.posted, "");
        assert_eq!(record.month_key(), None);
    }

    #[test]
    fn test_parse_posted_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 10);
        assert_eq!(parse_posted_date("2024-02-10"), expected);
        assert_eq!(parse_posted_date("2024-02-10T08:30:00Z"), expected);
        assert_eq!(parse_posted_date("2024-02-10 08:30:00"), expected);
        assert_eq!(parse_posted_date("02/10/2024"), expected);
        assert_eq!(parse_posted_date("last tuesday"), None);
        assert_eq!(parse_posted_date(""), None);
    }
}
