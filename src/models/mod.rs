// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{JobRecord, JobType, ExperienceLevel, Pay, PayRange, DateRange, DateField, FilterSpec, RangeError, SortOrder};
pub use requests::{SearchJobsRequest, SaveFiltersRequest, SavedJobRequest};
pub use responses::{SearchJobsResponse, FiltersResponse, SavedJobsResponse, HealthResponse, ErrorResponse};
