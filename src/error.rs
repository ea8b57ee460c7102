use thiserror::Error;

use crate::sql::CompileError;

#[derive(Error, Debug)]
pub enum TablegateError {
    #[error("syntax error: {0}")]
    Parse(String),

    #[error("no entity in query")]
    NoEntity,

    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("column '{column}' has unmapped type '{native_type}'")]
    UnmappedColumnType { column: String, native_type: String },

    #[error("schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("statement compilation error: {0}")]
    Compile(#[from] CompileError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<async_graphql::parser::Error> for TablegateError {
    fn from(err: async_graphql::parser::Error) -> Self {
        TablegateError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for TablegateError {
    fn from(err: toml::de::Error) -> Self {
        TablegateError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for TablegateError {
    fn from(err: toml::ser::Error) -> Self {
        TablegateError::Serialization(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, TablegateError>;
