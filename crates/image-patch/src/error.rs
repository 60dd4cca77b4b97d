/// Why a single wire element could not become an [`Operation`](crate::Operation).
#[derive(Debug, thiserror::Error, Copy, Clone, Eq, PartialEq)]
pub enum MalformedOperation {
    #[error("operation is not a json object")]
    NotAnObject,
    #[error("operation has no `path`")]
    MissingPath,
    #[error("operation `path` is not a string")]
    PathNotAString,
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum PatchError {
    #[error("patch document is not a json array")]
    NotAnArray,
    #[error("malformed operation at index {index}: {source}")]
    MalformedOperation {
        index: usize,
        #[source]
        source: MalformedOperation,
    },
    #[error("failed to serialize value for `{path}`: {message}")]
    InvalidValue { path: String, message: String },
    #[error("invalid json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for PatchError {
    fn from(err: serde_json::Error) -> Self {
        PatchError::Json(err.to_string())
    }
}
