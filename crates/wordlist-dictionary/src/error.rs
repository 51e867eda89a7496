#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dictionary returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid dictionary response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No definition in dictionary response")]
    MissingDefinition,
}
