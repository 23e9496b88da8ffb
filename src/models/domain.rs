use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::core::pay::parse_pay;

/// Kind of engagement offered by a posting
///
/// Only the exact canonical labels map onto the named variants; any other
/// spelling is kept verbatim in `Other`, so `label()` always returns the
/// text the posting carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Locum,
    Other(String),
}

impl JobType {
    pub fn label(&self) -> &str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::Locum => "Locum",
            JobType::Other(label) => label,
        }
    }
}

impl From<String> for JobType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Full-time" => JobType::FullTime,
            "Part-time" => JobType::PartTime,
            "Contract" => JobType::Contract,
            "Temporary" => JobType::Temporary,
            "Locum" => JobType::Locum,
            _ => JobType::Other(value),
        }
    }
}

impl From<&str> for JobType {
    fn from(value: &str) -> Self {
        JobType::from(value.to_string())
    }
}

impl From<JobType> for String {
    fn from(value: JobType) -> Self {
        match value {
            JobType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Seniority requested by a posting
///
/// Compared by exact label: "Entry Level" and "entry level" are different levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Expert,
    Other(String),
}

impl ExperienceLevel {
    pub fn label(&self) -> &str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Expert => "Expert",
            ExperienceLevel::Other(label) => label,
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Entry Level" => ExperienceLevel::Entry,
            "Mid Level" => ExperienceLevel::Mid,
            "Senior" => ExperienceLevel::Senior,
            "Expert" => ExperienceLevel::Expert,
            _ => ExperienceLevel::Other(value),
        }
    }
}

impl From<&str> for ExperienceLevel {
    fn from(value: &str) -> Self {
        ExperienceLevel::from(value.to_string())
    }
}

impl From<ExperienceLevel> for String {
    fn from(value: ExperienceLevel) -> Self {
        match value {
            ExperienceLevel::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Pay as posted: either a plain rate or free text such as `"₱1,500/hr"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pay {
    Rate(f64),
    Text(String),
}

impl Pay {
    /// Numeric amount used for range filtering and sorting. Never negative.
    pub fn amount(&self) -> f64 {
        match self {
            Pay::Rate(rate) if rate.is_finite() => rate.max(0.0),
            Pay::Rate(_) => 0.0,
            Pay::Text(text) => parse_pay(text),
        }
    }
}

/// A single posted position as consumed by search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "company_name", alias = "hospital_name")]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "jobType", alias = "job_type", alias = "type", default, deserialize_with = "blank_as_none")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(rename = "experienceLevel", alias = "experience_level", default, deserialize_with = "blank_as_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, alias = "salary", alias = "rate")]
    pub pay: Option<Pay>,
    #[serde(rename = "isUrgent", alias = "is_urgent", alias = "urgent", default)]
    pub is_urgent: Option<bool>,
    #[serde(rename = "postedAt", alias = "posted_at", alias = "created_at", default, deserialize_with = "lenient_datetime")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(alias = "application_deadline", default, deserialize_with = "lenient_datetime")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl JobRecord {
    /// Helper to get is_urgent as a bool, defaulting to false
    pub fn urgent(&self) -> bool {
        self.is_urgent.unwrap_or(false)
    }

    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Parsed pay amount; a posting without pay reads as 0
    pub fn pay_amount(&self) -> f64 {
        self.pay.as_ref().map(Pay::amount).unwrap_or(0.0)
    }

    pub fn date(&self, field: DateField) -> Option<DateTime<Utc>> {
        match field {
            DateField::Posted => self.posted_at,
            DateField::Deadline => self.deadline,
        }
    }
}

/// Inclusive numeric pay bounds, written on the wire as `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PayRange {
    pub min: f64,
    pub max: f64,
}

impl PayRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, amount: f64) -> bool {
        self.min <= amount && amount <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl From<(f64, f64)> for PayRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PayRange> for (f64, f64) {
    fn from(range: PayRange) -> Self {
        (range.min, range.max)
    }
}

/// Which job date a date range applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    #[default]
    Posted,
    Deadline,
}

/// Inclusive date bounds; a missing side is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    #[serde(deserialize_with = "lenient_datetime")]
    pub from: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub to: Option<DateTime<Utc>>,
    pub field: DateField,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// A user's search intent. Every field at its default imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub keyword: String,
    pub location: String,
    pub specialization: String,
    #[serde(rename = "jobTypes", alias = "jobType", alias = "job_types")]
    pub job_types: Vec<String>,
    #[serde(rename = "experienceLevel", alias = "experience_level", deserialize_with = "blank_as_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(rename = "payRange", alias = "pay_range")]
    pub pay_range: Option<PayRange>,
    #[serde(rename = "urgentOnly", alias = "urgent_only")]
    pub urgent_only: bool,
    #[serde(rename = "dateRange", alias = "date_range")]
    pub date_range: DateRange,
    #[serde(rename = "savedOnly", alias = "saved_only")]
    pub saved_only: bool,
}

/// Range constraints that can never be satisfied
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("pay range is inverted: {min} > {max}")]
    InvertedPayRange { min: f64, max: f64 },

    #[error("date range is inverted: {from} > {to}")]
    InvertedDateRange { from: DateTime<Utc>, to: DateTime<Utc> },
}

impl FilterSpec {
    /// Number of constraints that differ from the all-pass default
    pub fn active_filter_count(&self) -> usize {
        [
            !self.keyword.trim().is_empty(),
            !self.location.trim().is_empty(),
            !self.specialization.is_empty(),
            self.job_types.iter().any(|entry| !entry.trim().is_empty()),
            self.experience_level.is_some(),
            self.pay_range.is_some(),
            self.urgent_only,
            !self.date_range.is_unbounded(),
            self.saved_only,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_default(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Report pay or date bounds that would make the filter match nothing
    pub fn check_ranges(&self) -> Result<(), RangeError> {
        if let Some(range) = self.pay_range.filter(PayRange::is_inverted) {
            return Err(RangeError::InvertedPayRange { min: range.min, max: range.max });
        }

        if let (Some(from), Some(to)) = (self.date_range.from, self.date_range.to) {
            if from > to {
                return Err(RangeError::InvertedDateRange { from, to });
            }
        }

        Ok(())
    }
}

/// Explicit ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Keep the order the listings arrived in
    #[default]
    Listed,
    Newest,
    Oldest,
    PayHighToLow,
    PayLowToHigh,
    DeadlineSoonest,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Int(id) => id.to_string(),
        RawId::Uint(id) => id.to_string(),
    })
}

/// Null, missing and blank strings all read as `None`
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(T::from))
}

/// Accepts RFC 3339, naive timestamps, bare dates and unix seconds.
/// Anything else reads as `None` rather than failing the whole record.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(text)) => parse_datetime(&text),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    })
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_job_type_keeps_posted_label() {
        assert_eq!(JobType::from("Full-time"), JobType::FullTime);
        assert_eq!(JobType::from("Full Time"), JobType::Other("Full Time".to_string()));
        assert_eq!(JobType::from("Full Time").label(), "Full Time");
        assert_eq!(JobType::from("Contractual").label(), "Contractual");
        assert_eq!(String::from(JobType::from("FULL_TIME")), "FULL_TIME");
    }

    #[test]
    fn test_experience_level_labels_are_exact() {
        assert_eq!(ExperienceLevel::from("Entry Level"), ExperienceLevel::Entry);
        assert_ne!(ExperienceLevel::from("entry level"), ExperienceLevel::Entry);
        assert_ne!(ExperienceLevel::from("entry"), ExperienceLevel::from("Entry"));
        assert_eq!(ExperienceLevel::from("ENTRY").label(), "ENTRY");
    }

    #[test]
    fn test_job_record_from_backend_row() {
        let row = json!({
            "id": 42,
            "title": "ICU Nurse",
            "company_name": "St. Luke's",
            "location": null,
            "job_type": "Full-time",
            "experience_level": "",
            "salary": "₱1,500/hr",
            "is_urgent": null,
            "posted_at": "2024-03-01T08:00:00+00:00",
            "application_deadline": "2024-03-31"
        });

        let job: JobRecord = serde_json::from_value(row).unwrap();

        assert_eq!(job.id, "42");
        assert_eq!(job.company(), "St. Luke's");
        assert_eq!(job.location(), "");
        assert_eq!(job.job_type, Some(JobType::FullTime));
        assert_eq!(job.experience_level, None);
        assert_eq!(job.pay_amount(), 1500.0);
        assert!(!job.urgent());
        assert_eq!(job.posted_at, Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()));
        assert_eq!(job.deadline, Some(Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_unparseable_date_reads_as_none() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": "a",
            "postedAt": "last tuesday"
        }))
        .unwrap();

        assert_eq!(job.posted_at, None);
        assert_eq!(job.title, "");
    }

    #[test]
    fn test_negative_rate_reads_as_zero() {
        assert_eq!(Pay::Rate(-20.0).amount(), 0.0);
        assert_eq!(Pay::Rate(f64::NAN).amount(), 0.0);
        assert_eq!(Pay::Rate(850.5).amount(), 850.5);
    }

    #[test]
    fn test_filter_spec_wire_format() {
        let spec: FilterSpec = serde_json::from_value(json!({
            "keyword": "nurse",
            "jobTypes": ["Full-time", "Contract"],
            "payRange": [0, 2000],
            "experienceLevel": "",
            "urgentOnly": true
        }))
        .unwrap();

        assert_eq!(spec.keyword, "nurse");
        assert_eq!(spec.pay_range, Some(PayRange::new(0.0, 2000.0)));
        assert_eq!(spec.experience_level, None);
        assert!(spec.urgent_only);
        assert!(!spec.saved_only);
        assert_eq!(spec.active_filter_count(), 4);
    }

    #[test]
    fn test_default_spec_has_no_active_filters() {
        let spec = FilterSpec::default();
        assert!(spec.is_default());

        let blank_keyword = FilterSpec {
            keyword: "   ".to_string(),
            ..FilterSpec::default()
        };
        assert!(blank_keyword.is_default());

        let blank_job_types = FilterSpec {
            job_types: vec!["".to_string(), "  ".to_string()],
            ..FilterSpec::default()
        };
        assert!(blank_job_types.is_default());
    }

    #[test]
    fn test_check_ranges() {
        let inverted_pay = FilterSpec {
            pay_range: Some(PayRange::new(5000.0, 100.0)),
            ..FilterSpec::default()
        };
        assert!(matches!(
            inverted_pay.check_ranges(),
            Err(RangeError::InvertedPayRange { .. })
        ));

        let inverted_dates = FilterSpec {
            date_range: DateRange {
                from: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
                to: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
                field: DateField::Posted,
            },
            ..FilterSpec::default()
        };
        assert!(matches!(
            inverted_dates.check_ranges(),
            Err(RangeError::InvertedDateRange { .. })
        ));

        assert!(FilterSpec::default().check_ranges().is_ok());
    }
}
