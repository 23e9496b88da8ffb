use std::collections::HashSet;

use crate::models::{DateRange, ExperienceLevel, FilterSpec, JobRecord, PayRange};

/// A `FilterSpec` prepared for repeated evaluation
///
/// Text needles are trimmed and lowercased once, and blank fields are
/// dropped so that they impose no constraint.
#[derive(Debug, Clone)]
pub struct FilterQuery<'a> {
    keyword: Option<String>,
    location: Option<String>,
    specialization: Option<&'a str>,
    experience_level: Option<&'a ExperienceLevel>,
    job_types: Vec<String>,
    pay_range: Option<PayRange>,
    urgent_only: bool,
    date_range: DateRange,
    saved_ids: Option<&'a HashSet<String>>,
}

impl<'a> FilterQuery<'a> {
    pub fn new(spec: &'a FilterSpec, saved_ids: &'a HashSet<String>) -> Self {
        Self {
            keyword: lowercase_needle(&spec.keyword),
            location: lowercase_needle(&spec.location),
            specialization: Some(spec.specialization.as_str()).filter(|s| !s.is_empty()),
            experience_level: spec.experience_level.as_ref(),
            job_types: spec.job_types.iter().filter_map(|t| lowercase_needle(t)).collect(),
            pay_range: spec.pay_range,
            urgent_only: spec.urgent_only,
            date_range: spec.date_range,
            saved_ids: spec.saved_only.then_some(saved_ids),
        }
    }
}

fn lowercase_needle(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Check a single job against a one-off spec
///
/// Prefer building a `FilterQuery` once when checking many jobs.
pub fn matches_filter(job: &JobRecord, spec: &FilterSpec, saved_ids: &HashSet<String>) -> bool {
    matches_query(job, &FilterQuery::new(spec, saved_ids))
}

/// Check whether a job satisfies every constraint of the query
#[inline]
pub fn matches_query(job: &JobRecord, query: &FilterQuery<'_>) -> bool {
    // Cheap flag checks first
    if query.urgent_only && !job.urgent() {
        return false;
    }

    if let Some(saved) = query.saved_ids {
        if !saved.contains(&job.id) {
            return false;
        }
    }

    if let Some(specialization) = query.specialization {
        if job.specialization.as_deref() != Some(specialization) {
            return false;
        }
    }

    if let Some(level) = query.experience_level {
        if job.experience_level.as_ref() != Some(level) {
            return false;
        }
    }

    if let Some(range) = &query.pay_range {
        if !range.contains(job.pay_amount()) {
            return false;
        }
    }

    if !matches_date_range(job, &query.date_range) {
        return false;
    }

    if !matches_job_types(job, &query.job_types) {
        return false;
    }

    if let Some(location) = &query.location {
        if !contains_lowercase(job.location(), location) {
            return false;
        }
    }

    if let Some(keyword) = &query.keyword {
        if !matches_keyword(job, keyword) {
            return false;
        }
    }

    true
}

/// Keyword hits title, company or description
#[inline]
fn matches_keyword(job: &JobRecord, keyword: &str) -> bool {
    contains_lowercase(&job.title, keyword)
        || contains_lowercase(job.company(), keyword)
        || contains_lowercase(job.description(), keyword)
}

/// The job's type, as posted, must contain at least one accepted entry.
/// A job without a type never satisfies a non-empty set.
#[inline]
fn matches_job_types(job: &JobRecord, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }

    match &job.job_type {
        Some(job_type) => {
            let label = job_type.label().to_lowercase();
            accepted.iter().any(|entry| label.contains(entry.as_str()))
        }
        None => false,
    }
}

#[inline]
fn matches_date_range(job: &JobRecord, range: &DateRange) -> bool {
    if range.is_unbounded() {
        return true;
    }

    let Some(date) = job.date(range.field) else {
        return false;
    };

    range.from.map_or(true, |from| date >= from) && range.to.map_or(true, |to| date <= to)
}

#[inline]
fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
