// Core algorithm exports
pub mod engine;
pub mod filters;
pub mod pay;
pub mod sort;

pub use engine::{JobFilterEngine, SearchResult};
pub use filters::{matches_filter, matches_query, FilterQuery};
pub use pay::parse_pay;
pub use sort::sort_jobs;
