//! Errors raised by the prefetch operations.

use thiserror::Error;

/// Failure of a prefetch operation. Always fatal to the calling operation; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefetchError {
    /// An external result did not have the expected length or character class.
    #[error("{}", describe_format(.value, .expected_len))]
    ChecksumFormat {
        value: String,
        /// Set when the length check failed.
        expected_len: Option<usize>,
    },

    /// An external tool could not be run or exited with a failure status.
    #[error("prefetch failed: {command}")]
    PrefetchFailed { command: String },
}

fn describe_format(value: &str, expected_len: &Option<usize>) -> String {
    match expected_len {
        Some(n) => format!(
            "invalid checksum length; expected {}, got {} ({:?})",
            n,
            value.len(),
            value
        ),
        None => format!("invalid checksum format: {:?}", value),
    }
}
