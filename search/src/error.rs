//! Typed search errors.
//!
//! A hand-written enum and `Display`/`Error` impl, matching the geometric
//! core's existing error style rather than adding a derive-macro dependency
//! for this one small surface.

/// Typed failure for `solve()` itself, raised before the main loop starts.
/// Degenerate numeric input is never an error (the kernel reports it as
/// `count == 0`); an exhausted budget is never an error (it is reported as
/// an unsolvable outcome). This enum exists for contract violations only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `target`'s figure kind is not one of point, line, circle.
    UnsupportedTarget { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedTarget { detail } => write!(f, "unsupported target: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
