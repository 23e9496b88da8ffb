// Service exports
pub mod cache;
pub mod listings;
pub mod postgres;

pub use cache::{CacheManager, CacheKey, CacheError};
pub use listings::{ListingsClient, ListingsError};
pub use postgres::{PostgresClient, PostgresError};
