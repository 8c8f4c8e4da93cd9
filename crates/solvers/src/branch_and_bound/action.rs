/// Control actions supported by the branch-and-bound engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search and return the current incumbent.
    StopEarly,
}
