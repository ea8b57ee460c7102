mod client;
mod introspect;
mod row;
mod types;

pub use client::Database;
pub use row::{ResultSet, SqlValue};
pub use types::{column_kind, type_token, ScalarKind, TableSchema};
