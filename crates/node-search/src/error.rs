use derive_more::Display;

/// Errors raised before a search starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchError {
    /// No starting node was supplied
    #[display(fmt = "search requires a starting node, got none")]
    NullRoot,
}

impl std::error::Error for SearchError {}
