/// Error types shared by the spec-table consumers.
///
/// These cover loading and querying the spec store. Application-specific errors
/// (classification, rendering, configuration) live in the binary crate and wrap
/// `CommonError` via `#[from]`.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed spec file {path}: {message}")]
    MalformedSpecFile { path: String, message: String },

    #[error("unresolved model: {0}")]
    UnresolvedModel(String),
}
