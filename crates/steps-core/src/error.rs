use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the step analysis pipeline.
#[derive(Error, Debug)]
pub enum StepsError {
    /// The export file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML at byte {position}: {message}")]
    XmlParse { position: u64, message: String },

    /// The document is well-formed but does not have the expected structure.
    #[error("Unexpected export structure: {0}")]
    Schema(String),

    /// A record attribute holds a value that cannot be converted.
    #[error("Invalid {field} value: {value:?}")]
    InvalidValue { field: String, value: String },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// An error originating from the terminal / chart display layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the step-insights crates.
pub type Result<T> = std::result::Result<T, StepsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StepsError::FileRead {
            path: PathBuf::from("/exports/dataset.xml"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/exports/dataset.xml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_xml_parse() {
        let err = StepsError::XmlParse {
            position: 42,
            message: "unclosed tag".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed XML at byte 42: unclosed tag");
    }

    #[test]
    fn test_error_display_schema() {
        let err = StepsError::Schema("missing HealthData.Record".to_string());
        assert_eq!(
            err.to_string(),
            "Unexpected export structure: missing HealthData.Record"
        );
    }

    #[test]
    fn test_error_display_invalid_value() {
        let err = StepsError::InvalidValue {
            field: "value".to_string(),
            value: "12.5".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value value: \"12.5\"");
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = StepsError::TimestampParse("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: yesterday");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StepsError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
