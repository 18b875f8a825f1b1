use thiserror::Error;

/// Failures that abort loading the whole catalog. Problems with individual
/// records are reported as [`crate::MalformedRecord`] instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not a JSON array of records: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read showcase file {path}: {source}")]
    ShowcaseFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse showcase file: {0}")]
    ShowcaseFileParse(#[from] serde_yaml::Error),

    #[error("showcase validation failed: {0}")]
    Validation(String),
}
