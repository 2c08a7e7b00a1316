//! Glicemia Core Library
//!
//! Record store, date picker and share stub for logging glucose readings.
//! Presentation layers drive a [`Session`] with [`Intent`]s and render its
//! [`View`].

pub mod date_picker;
pub mod models;
pub mod notify;
pub mod session;
pub mod share;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use date_picker::{is_selectable, DatePicker, ListenerGuard, PointerListeners, PointerTarget};
pub use models::{parse_level, GlicemiaRecord};
pub use notify::{Notification, Notifier, Severity};
pub use session::{Intent, Session, View};
pub use share::{
    Clipboard, ClipboardError, CopyOutcome, LinkGenerator, ShareController, COPIED_RESET_AFTER,
    DEFAULT_SHARE_BASE_URL, LINK_EXPIRY_NOTICE,
};
pub use storage::{BlobStorage, FileStorage, StorageError, RECORDS_KEY};
pub use store::{AppendOutcome, RecordStore, StoreError, SubscriptionId};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
