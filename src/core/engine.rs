use std::collections::HashSet;

use crate::core::{
    filters::{matches_query, FilterQuery},
    sort::sort_jobs,
};
use crate::models::{FilterSpec, JobRecord, SortOrder};

/// Result of a search
#[derive(Debug)]
pub struct SearchResult {
    pub jobs: Vec<JobRecord>,
    pub total_candidates: usize,
    /// Matches before the limit was applied
    pub matched: usize,
}

/// Selects the job listings that satisfy a `FilterSpec`
///
/// The engine keeps no state between calls: the spec and the saved-job ids
/// are passed in, and persisting them is up to the caller.
///
/// # Pipeline Stages
/// 1. Predicate filtering (order preserving)
/// 2. Optional explicit sort
/// 3. Limit
#[derive(Debug, Clone, Copy, Default)]
pub struct JobFilterEngine;

impl JobFilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Keep the jobs matching `spec`, in their original relative order
    ///
    /// `saved_ids` is only consulted when `spec.saved_only` is set.
    pub fn filter(
        &self,
        jobs: Vec<JobRecord>,
        spec: &FilterSpec,
        saved_ids: &HashSet<String>,
    ) -> Vec<JobRecord> {
        if spec.is_default() {
            return jobs;
        }

        let query = FilterQuery::new(spec, saved_ids);
        jobs.into_iter()
            .filter(|job| matches_query(job, &query))
            .collect()
    }

    /// The all-pass spec; filtering with it returns the input unchanged
    pub fn reset_to_defaults(&self) -> FilterSpec {
        FilterSpec::default()
    }

    /// Filter, then sort, then truncate to `limit`
    ///
    /// # Arguments
    /// * `jobs` - All listings loaded from the backend
    /// * `spec` - The user's current filters
    /// * `saved_ids` - Ids of the jobs the user has saved
    /// * `order` - Ordering applied to the matches
    /// * `limit` - Maximum number of jobs to return
    pub fn search(
        &self,
        jobs: Vec<JobRecord>,
        spec: &FilterSpec,
        saved_ids: &HashSet<String>,
        order: SortOrder,
        limit: usize,
    ) -> SearchResult {
        let total_candidates = jobs.len();

        let mut matches = self.filter(jobs, spec, saved_ids);
        let matched = matches.len();

        sort_jobs(&mut matches, order);
        matches.truncate(limit);

        SearchResult {
            jobs: matches,
            total_candidates,
            matched,
        }
    }
}
