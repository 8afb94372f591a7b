use thiserror::Error;

/// Failure modes for behavior installation and toggle-target resolution.
///
/// Every variant is non-fatal: behaviors log the error and leave document
/// state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BehaviorError {
    /// The page's toolkit binding has no collapse capability.
    #[error("collapse capability is not available")]
    MissingCapability,
    /// A toggle link's target selector is missing, empty, or `#`.
    #[error("toggle target is missing or empty")]
    EmptyTarget,
    /// A toggle link's target selector resolved to no elements.
    #[error("toggle target {0:?} matched no element")]
    TargetNotFound(String),
}
