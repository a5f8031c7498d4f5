use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Machine-readable error codes for storage and configuration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    StorageUnavailable,
    CorruptRecord,
    MissingRecord,
    CorruptIndex,
    StorageWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::StorageUnavailable => "E3001",
            Self::CorruptRecord => "E3002",
            Self::MissingRecord => "E3003",
            Self::CorruptIndex => "E3004",
            Self::StorageWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::StorageUnavailable => "Storage unavailable",
            Self::CorruptRecord => "Corrupt item record",
            Self::MissingRecord => "Indexed item record missing",
            Self::CorruptIndex => "Corrupt storage file",
            Self::StorageWriteFailed => "Storage write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in tasklist.toml and retry."),
            Self::StorageUnavailable => Some("Check that the storage path exists and is readable."),
            Self::CorruptRecord | Self::MissingRecord | Self::CorruptIndex => {
                Some("Remove or repair the storage file; the list cannot be loaded as-is.")
            }
            Self::StorageWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Another process holds the storage lock; retry later."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures from a key-value store or the persistence adapter on top of it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{}: cannot access {}: {source}", ErrorCode::StorageUnavailable, .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: failed to write {}: {source}", ErrorCode::StorageWriteFailed, .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: storage file {} is not a JSON object: {source}", ErrorCode::CorruptIndex, .path.display())]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: record at key {key} does not parse: {source}", ErrorCode::CorruptRecord)]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: index lists {key} but no record is stored there", ErrorCode::MissingRecord)]
    MissingRecord { key: String },

    #[error("{}: failed to encode record {key}: {source}", ErrorCode::InternalUnexpected)]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: lock timed out after {waited:?} at {}", ErrorCode::LockContention, .path.display())]
    LockTimeout { path: PathBuf, waited: Duration },
}

impl StoreError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable { .. } => ErrorCode::StorageUnavailable,
            Self::Write { .. } => ErrorCode::StorageWriteFailed,
            Self::CorruptFile { .. } => ErrorCode::CorruptIndex,
            Self::CorruptRecord { .. } => ErrorCode::CorruptRecord,
            Self::MissingRecord { .. } => ErrorCode::MissingRecord,
            Self::Encode { .. } => ErrorCode::InternalUnexpected,
            Self::LockTimeout { .. } => ErrorCode::LockContention,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
