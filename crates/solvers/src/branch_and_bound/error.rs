use thiserror::Error;

/// Errors that can occur when starting a branch-and-bound search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("root fixing covers {found} items, instance has {expected}")]
    FixingLength { expected: usize, found: usize },
}
