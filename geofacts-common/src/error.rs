//! Errors raised by the shared config, CSV and database layers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading a CSV or config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, unreadable or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lookup miss in the countries CSV, the glossary or a data file path
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reference data that cannot be stored as given (bad CSV header, over-long value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = Error::InvalidInput("Glossary row 3: 'entry' exceeds 50 characters".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: Glossary row 3: 'entry' exceeds 50 characters"
        );

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
