use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("No clipboard available: {0}")]
    Unavailable(String),

    #[error("Clipboard access denied: {0}")]
    Denied(String),
}

/// Platform clipboard.
///
/// A write resolves once to success or failure. There is no cancellation.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}
