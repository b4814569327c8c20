use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("record already exists: {0}")]
    UniqueViolation(String),
    #[error("corrupt {table} record {id}: {reason}")]
    CorruptRecord {
        table: &'static str,
        id: String,
        reason: String,
    },
}

impl StorageError {
    pub fn corrupt(table: &'static str, id: &str, reason: impl Display) -> Self {
        StorageError::CorruptRecord {
            table,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Translate a unique-constraint failure into `UniqueViolation`, keeping
    /// every other database error as is.
    pub fn from_write(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::UniqueViolation(what.into())
            }
            _ => StorageError::Database(err),
        }
    }
}
