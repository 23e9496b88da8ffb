use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{JobRecord, SortOrder};

/// Reorder jobs in place
///
/// The sort is stable, so jobs with equal keys keep their listed order.
/// Jobs missing the date a sort needs go last.
pub fn sort_jobs(jobs: &mut [JobRecord], order: SortOrder) {
    match order {
        SortOrder::Listed => {}
        SortOrder::Newest => jobs.sort_by(|a, b| missing_last(a.posted_at, b.posted_at, Ordering::reverse)),
        SortOrder::Oldest => jobs.sort_by(|a, b| missing_last(a.posted_at, b.posted_at, |o| o)),
        SortOrder::PayHighToLow => jobs.sort_by(|a, b| b.pay_amount().total_cmp(&a.pay_amount())),
        SortOrder::PayLowToHigh => jobs.sort_by(|a, b| a.pay_amount().total_cmp(&b.pay_amount())),
        SortOrder::DeadlineSoonest => jobs.sort_by(|a, b| missing_last(a.deadline, b.deadline, |o| o)),
    }
}

fn missing_last(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    direction: impl Fn(Ordering) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pay;
    use chrono::TimeZone;

    fn job(id: &str, posted_day: Option<u32>, pay: Option<f64>) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: format!("Job {}", id),
            company: None,
            location: None,
            job_type: None,
            specialization: None,
            experience_level: None,
            pay: pay.map(Pay::Rate),
            is_urgent: None,
            posted_at: posted_day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
            deadline: posted_day.map(|d| Utc.with_ymd_and_hms(2024, 2, d, 0, 0, 0).unwrap()),
            description: None,
        }
    }

    fn ids(jobs: &[JobRecord]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_listed_keeps_order() {
        let mut jobs = vec![job("b", Some(2), None), job("a", Some(1), None)];
        sort_jobs(&mut jobs, SortOrder::Listed);
        assert_eq!(ids(&jobs), vec!["b", "a"]);
    }

    #[test]
    fn test_newest_puts_undated_last() {
        let mut jobs = vec![
            job("undated", None, None),
            job("old", Some(1), None),
            job("new", Some(20), None),
        ];
        sort_jobs(&mut jobs, SortOrder::Newest);
        assert_eq!(ids(&jobs), vec!["new", "old", "undated"]);

        sort_jobs(&mut jobs, SortOrder::Oldest);
        assert_eq!(ids(&jobs), vec!["old", "new", "undated"]);
    }

    #[test]
    fn test_pay_sort_is_stable() {
        let mut jobs = vec![
            job("a", None, Some(1000.0)),
            job("b", None, Some(3000.0)),
            job("c", None, Some(1000.0)),
        ];
        sort_jobs(&mut jobs, SortOrder::PayHighToLow);
        assert_eq!(ids(&jobs), vec!["b", "a", "c"]);

        sort_jobs(&mut jobs, SortOrder::PayLowToHigh);
        assert_eq!(ids(&jobs), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_deadline_soonest() {
        let mut jobs = vec![job("late", Some(25), None), job("none", None, None), job("soon", Some(3), None)];
        sort_jobs(&mut jobs, SortOrder::DeadlineSoonest);
        assert_eq!(ids(&jobs), vec!["soon", "late", "none"]);
    }
}
