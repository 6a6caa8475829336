use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while resolving, reading, or converting
/// a JSON resource.
#[derive(Debug, Error)]
pub enum ReadError {
    /// No `ResourceReader` was supplied before the first read. On platforms
    /// that need a context (bundle directory, documents directory) this is
    /// the "initialize() was never called" case.
    #[error("resource reader not initialized; supply a platform context before reading")]
    NotInitialized,

    /// The name did not resolve at any candidate location.
    #[error("resource not found: {name} (tried: {})", format_attempted(.attempted))]
    NotFound {
        name: String,
        /// Candidate paths in the order they were tried.
        attempted: Vec<PathBuf>,
    },

    /// A location existed but could not be read. Terminal: no further
    /// locations are tried once existence was confirmed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not syntactically valid JSON.
    #[error("invalid JSON syntax: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The document parsed, but its root is an array, scalar, or null.
    #[error("top-level JSON value is not an object")]
    NotAnObject,

    /// Typed parsing was requested but no capability is installed.
    #[error("typed parsing is not supported here")]
    Unsupported,

    /// Typed parsing: no type registered under this name.
    #[error("type not registered: {0}")]
    TypeNotFound(String),

    /// Typed parsing: the JSON does not fit the target type's shape.
    #[error("JSON does not match the shape of {type_name}: {source}")]
    ShapeMismatch {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_attempted(attempted: &[PathBuf]) -> String {
    if attempted.is_empty() {
        return "no locations".into();
    }
    attempted
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Discriminant-only mirror of [`ReadError`], for matching on the failure
/// class without destructuring payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotInitialized,
    NotFound,
    Io,
    Syntax,
    NotAnObject,
    Unsupported,
    TypeNotFound,
    ShapeMismatch,
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized => ErrorKind::NotInitialized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::Io,
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::NotAnObject => ErrorKind::NotAnObject,
            Self::Unsupported => ErrorKind::Unsupported,
            Self::TypeNotFound(_) => ErrorKind::TypeNotFound,
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
        }
    }

    /// True for errors raised before or during the read stage, as opposed
    /// to parse/convert failures.
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotInitialized | ErrorKind::NotFound | ErrorKind::Io
        )
    }
}
