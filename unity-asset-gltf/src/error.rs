use thiserror::Error;

#[derive(Debug, Error)]
pub enum GltfError {
    #[error("failed to serialize glTF JSON: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, GltfError>;
