use image_patch::PatchError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum OpSpecError {
    #[error("expected `<op>:<path>[=<value>]`, got `{spec}`")]
    MissingSeparator { spec: String },
    #[error("unsupported operation `{op}`, expected add, replace or remove")]
    UnsupportedKind { op: String },
    #[error("`{op}` needs a value: `{op}:<path>=<value>`")]
    MissingValue { op: String },
}
