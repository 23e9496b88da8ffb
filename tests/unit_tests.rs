// Unit tests for Moonlight Jobs

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use moonlight_jobs::core::{
    filters::{matches_filter, matches_query, FilterQuery},
    pay::parse_pay,
    sort::sort_jobs,
};
use moonlight_jobs::models::{DateField, DateRange, ExperienceLevel, FilterSpec, JobRecord, JobType, Pay, PayRange, SortOrder};

fn create_job() -> JobRecord {
    JobRecord {
        id: "job-1".to_string(),
        title: "Locum Anesthesiologist".to_string(),
        company: Some("Cebu Doctors' Hospital".to_string()),
        location: Some("Cebu City".to_string()),
        job_type: Some(JobType::Locum),
        specialization: Some("Anesthesiology".to_string()),
        experience_level: Some(ExperienceLevel::Expert),
        pay: Some(Pay::Text("₱4,500 per shift".to_string())),
        is_urgent: None,
        posted_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
        deadline: Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()),
        description: None,
    }
}

#[test]
fn test_parse_pay_variants() {
    assert_eq!(parse_pay("₱4,500 per shift"), 4500.0);
    assert_eq!(parse_pay("USD 95.75/hr"), 95.0);
    assert_eq!(parse_pay("TBD"), 0.0);
}

#[test]
fn test_pay_fraction_does_not_push_past_upper_bound() {
    let mut job = create_job();
    job.pay = Some(Pay::Text("₱2,000.50/hr".to_string()));
    let spec = FilterSpec { pay_range: Some(PayRange::new(0.0, 2000.0)), ..FilterSpec::default() };

    assert!(matches_filter(&job, &spec, &HashSet::new()));
}

#[test]
fn test_keyword_matches_company() {
    let spec = FilterSpec { keyword: "doctors'".to_string(), ..FilterSpec::default() };
    assert!(matches_filter(&create_job(), &spec, &HashSet::new()));
}

#[test]
fn test_missing_description_never_matches_keyword() {
    let spec = FilterSpec { keyword: "overnight".to_string(), ..FilterSpec::default() };
    assert!(!matches_filter(&create_job(), &spec, &HashSet::new()));
}

#[test]
fn test_unset_urgency_is_not_urgent() {
    let spec = FilterSpec { urgent_only: true, ..FilterSpec::default() };
    assert!(!matches_filter(&create_job(), &spec, &HashSet::new()));
}

#[test]
fn test_experience_level_exact() {
    let expert = FilterSpec { experience_level: Some(ExperienceLevel::Expert), ..FilterSpec::default() };
    let senior = FilterSpec { experience_level: Some(ExperienceLevel::Senior), ..FilterSpec::default() };

    assert!(matches_filter(&create_job(), &expert, &HashSet::new()));
    assert!(!matches_filter(&create_job(), &senior, &HashSet::new()));
}

#[test]
fn test_deadline_date_range() {
    let spec = FilterSpec {
        date_range: DateRange {
            from: Some(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()),
            field: DateField::Deadline,
        },
        ..FilterSpec::default()
    };

    assert!(matches_filter(&create_job(), &spec, &HashSet::new()));
}

#[test]
fn test_inverted_date_range_matches_nothing() {
    let spec = FilterSpec {
        date_range: DateRange {
            from: Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            field: DateField::Posted,
        },
        ..FilterSpec::default()
    };

    assert!(!matches_filter(&create_job(), &spec, &HashSet::new()));
    assert!(spec.check_ranges().is_err());
}

#[test]
fn test_prepared_query_reused_across_jobs() {
    let spec = FilterSpec {
        pay_range: Some(PayRange::new(4000.0, 5000.0)),
        job_types: vec!["LOCUM".to_string()],
        ..FilterSpec::default()
    };
    let saved = HashSet::new();
    let query = FilterQuery::new(&spec, &saved);

    let mut cheap = create_job();
    cheap.pay = Some(Pay::Rate(900.0));

    assert!(matches_query(&create_job(), &query));
    assert!(!matches_query(&cheap, &query));
}

#[test]
fn test_sort_newest_first() {
    let mut older = create_job();
    older.id = "older".to_string();
    older.posted_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());

    let mut jobs = vec![older, create_job()];
    sort_jobs(&mut jobs, SortOrder::Newest);

    assert_eq!(jobs[0].id, "job-1");
    assert_eq!(jobs[1].id, "older");
}

#[test]
fn test_filter_spec_serializes_pay_range_as_pair() {
    let spec = FilterSpec { pay_range: Some(PayRange::new(0.0, 2000.0)), ..FilterSpec::default() };
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["payRange"], serde_json::json!([0.0, 2000.0]));
    assert_eq!(value["urgentOnly"], serde_json::json!(false));
}
