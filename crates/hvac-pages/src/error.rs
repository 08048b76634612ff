use std::path::PathBuf;

use hvac_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unmapped combination: {0}")]
    UnmappedCombination(String),

    #[error("missing template: {0}")]
    MissingTemplate(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
