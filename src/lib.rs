//! Moonlight Jobs - job listing search for the Moonlight healthcare staffing marketplace
//!
//! Hospitals post shifts and positions; moonlighters search them. This library
//! provides the filtering engine behind that search and the HTTP service around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{JobFilterEngine, SearchResult, parse_pay};
pub use crate::models::{JobRecord, JobType, ExperienceLevel, Pay, PayRange, DateRange, DateField, FilterSpec, SortOrder};
