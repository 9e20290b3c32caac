pub mod config;
pub mod db;
pub mod error;
pub mod ingestion;
pub mod query;
pub mod schema;

pub use config::Config;
pub use error::{MovieDbError, Result, RowError};
