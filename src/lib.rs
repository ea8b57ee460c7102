pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod schema;
pub mod sql;

// Re-export commonly used types
pub use config::{Config, DatabaseConfig, EntityConfig, ServerConfig};
pub use db::Database;
pub use error::{Result, TablegateError};
pub use schema::Gateway;
