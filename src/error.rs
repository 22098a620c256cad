use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of the report pipeline.
///
/// Per-cell problems (bad numbers, bad dates) never show up here; they are
/// coerced to [`Value::Null`](crate::data::model::Value::Null) where they occur.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("{} is not valid {encoding}", path.display())]
    Decode { path: PathBuf, encoding: String },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("selected columns not found in input: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = PipelineError::MissingColumns {
            missing: vec!["Type".to_owned(), "Shares".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "selected columns not found in input: Type, Shares"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let err = PipelineError::Io {
            path: PathBuf::from("posts.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("cannot read posts.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
