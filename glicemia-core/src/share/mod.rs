//! Share stub: link generation, dialog state and clipboard copy.

mod clipboard;
mod controller;
mod link;

pub use clipboard::{Clipboard, ClipboardError};
pub use controller::{
    CopyOutcome, ShareController, COPIED_RESET_AFTER, COPY_FAILURE_DESCRIPTION,
    COPY_FAILURE_TITLE, COPY_SUCCESS_DESCRIPTION, COPY_SUCCESS_TITLE,
};
pub use link::{LinkGenerator, DEFAULT_SHARE_BASE_URL, LINK_EXPIRY_NOTICE};
