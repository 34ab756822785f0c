use thiserror::Error;

/// Reasons the editor reducer refuses an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no project is loaded")]
    NoProject,
    #[error("no page is selected")]
    NoCurrentPage,
    #[error("page `{0}` does not exist")]
    PageNotFound(String),
    #[error("block `{0}` is not on the current page")]
    BlockNotFound(String),
}

/// Problems found while reading an exported project back in.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("project JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("page id `{0}` appears more than once")]
    DuplicatePage(String),
    #[error("block id `{block_id}` appears more than once on page `{page_id}`")]
    DuplicateBlock { page_id: String, block_id: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failures talking to the page configuration API.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("request failed: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("server responded {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("invalid page config: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("block type `{0}` is already registered")]
    Duplicate(String),
}

/// Reasons a nested block tree cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("block `{block_id}` contains itself: {}", path.join(" -> "))]
    Cycle { block_id: String, path: Vec<String> },
    #[error("block `{block_id}` is nested deeper than {max_depth} levels")]
    TooDeep { block_id: String, max_depth: usize },
}

/// A block prop that does not match its declared schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropIssue {
    #[error("`{key}` expected {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{key}` value `{value}` is not one of the allowed options")]
    UnknownOption { key: String, value: String },
    #[error("`{key}` value {value} is outside {min}..={max}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("`{key}` is ignored because `{by}` is set")]
    Superseded { key: String, by: String },
    #[error("props for `{block_type}` could not be parsed: {reason}")]
    Unparseable { block_type: String, reason: String },
}
