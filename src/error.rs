use thiserror::Error;

/// Error types for the minikmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Unrecognized centroid initialization method name
    #[error("Unknown initialization method: {0} (expected \"random\" or \"kmeans++\")")]
    UnknownInit(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Dimension mismatch between inputs and model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),
}
