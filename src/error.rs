//! Error taxonomy for addressing and pixel writes.

use thiserror::Error;

/// Errors surfaced by attach and pixel-write operations.
///
/// Connection failures are intentionally absent: a failed write closes the
/// transport and the next flush reopens it, so callers never see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A strip geometry argument fell outside the device's fixed layout.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A pixel index referred past the end of its strip.
    #[error("pixel index {index} out of range for a strip of {count} pixels")]
    OutOfRange { index: usize, count: usize },

    /// Attaching the strip would overflow a line or device pixel budget.
    #[error("capacity exceeded: {requested} pixels requested, {available} available")]
    CapacityExceeded { requested: usize, available: usize },
}
