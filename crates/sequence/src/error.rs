use thiserror::Error;

/// An operation that needs at least one element was called on an empty
/// sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("method: {op}, error: empty container")]
pub struct EmptyContainer {
    pub op: &'static str,
}

impl EmptyContainer {
    pub(crate) const fn new(op: &'static str) -> Self {
        Self { op }
    }
}

pub type Result<T> = std::result::Result<T, EmptyContainer>;
