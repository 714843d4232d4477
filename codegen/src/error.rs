use std::path::PathBuf;

use crate::openai::OpenAiError;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read prompt file {}: {source}", path.display())]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load API key from {}: {reason}", path.display())]
    Credential { path: PathBuf, reason: String },

    #[error("API request failed: {0}")]
    Api(#[from] OpenAiError),

    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("Failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
