#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
#[error("invalid json pointer `{input}`: must be empty or start with `/`")]
pub struct ParseJsonPointerError {
    pub input: String,
}
