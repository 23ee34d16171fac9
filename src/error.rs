use thiserror::Error;

/// Failure to turn ABI text into an [`Interface`](crate::Interface).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("ABI must be a JSON array of fragments")]
    NotAnArray,

    #[error("fragment has no `type` and cannot be inferred as a function")]
    MissingFragmentType,

    #[error("malformed fragment: {0}")]
    MalformedFragment(String),

    #[error("malformed type: {0}")]
    MalformedType(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown format `{0}` (expected one of: full, minimal, json, sighash)")]
    UnknownFormat(String),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Either half of a parse-then-render pass.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
