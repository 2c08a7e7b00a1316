//! Share dialog and copy-to-clipboard flow.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::clipboard::{Clipboard, ClipboardError};
use super::link::LinkGenerator;
use crate::notify::{Notification, Notifier};

/// How long the copied flag stays set after a successful copy.
pub const COPIED_RESET_AFTER: Duration = Duration::from_secs(2);

pub const COPY_SUCCESS_TITLE: &str = "Link copied!";
pub const COPY_SUCCESS_DESCRIPTION: &str = "The link was copied to the clipboard.";
pub const COPY_FAILURE_TITLE: &str = "Copy failed";
pub const COPY_FAILURE_DESCRIPTION: &str = "Could not copy the link. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(ClipboardError),
}

pub struct ShareController<C, N> {
    generator: LinkGenerator,
    clipboard: C,
    notifier: N,
    dialog_open: bool,
    link: Option<String>,
    copied: Arc<watch::Sender<bool>>,
    reset: Option<JoinHandle<()>>,
}

impl<C: Clipboard, N: Notifier> ShareController<C, N> {
    pub fn new(generator: LinkGenerator, clipboard: C, notifier: N) -> Self {
        let (copied, _) = watch::channel(false);
        Self {
            generator,
            clipboard,
            notifier,
            dialog_open: false,
            link: None,
            copied: Arc::new(copied),
            reset: None,
        }
    }

    /// Generates a link without touching dialog state.
    pub fn generate_link(&self) -> String {
        self.generator.generate_link()
    }

    /// Opens the dialog with a freshly generated link and returns it.
    ///
    /// Any pending auto-clear is cancelled and the copied flag reset, since
    /// the new link has not been copied yet.
    pub fn open_dialog(&mut self) -> &str {
        self.cancel_reset();
        self.copied.send_replace(false);
        self.dialog_open = true;
        self.link.insert(self.generator.generate_link())
    }

    /// Closes the dialog and discards its link.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.link = None;
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// The link shown in the open dialog.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn is_copied(&self) -> bool {
        *self.copied.borrow()
    }

    /// Receiver that observes the copied flag, including the auto-clear.
    pub fn watch_copied(&self) -> watch::Receiver<bool> {
        self.copied.subscribe()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copies `link` to the clipboard and reports the outcome.
    ///
    /// On success the copied flag is set and cleared again after
    /// [`COPIED_RESET_AFTER`]. On failure the flag is left as it was.
    pub async fn copy(&mut self, link: &str) -> CopyOutcome {
        match self.clipboard.write_text(link).await {
            Ok(()) => {
                self.cancel_reset();
                self.copied.send_replace(true);
                self.notifier
                    .notify(Notification::info(COPY_SUCCESS_TITLE, COPY_SUCCESS_DESCRIPTION));

                let copied = Arc::clone(&self.copied);
                self.reset = Some(tokio::spawn(async move {
                    tokio::time::sleep(COPIED_RESET_AFTER).await;
                    copied.send_replace(false);
                }));

                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::error!("Failed to copy link: {}", e);
                self.notifier.notify(Notification::destructive(
                    COPY_FAILURE_TITLE,
                    COPY_FAILURE_DESCRIPTION,
                ));
                CopyOutcome::Failed(e)
            }
        }
    }

    /// Copies the link of the open dialog. Returns `None` when there is none.
    pub async fn copy_current(&mut self) -> Option<CopyOutcome> {
        let link = self.link.clone()?;
        Some(self.copy(&link).await)
    }

    fn cancel_reset(&mut self) {
        if let Some(task) = self.reset.take() {
            task.abort();
        }
    }
}

impl<C, N> Drop for ShareController<C, N> {
    fn drop(&mut self) {
        if let Some(task) = self.reset.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::testing::{MemoryClipboard, RecordingNotifier};

    fn controller(clipboard: MemoryClipboard) -> ShareController<MemoryClipboard, RecordingNotifier> {
        ShareController::new(LinkGenerator::default(), clipboard, RecordingNotifier::default())
    }

    #[tokio::test]
    async fn test_open_dialog_generates_link() {
        let mut share = controller(MemoryClipboard::default());
        assert!(!share.is_dialog_open());
        assert!(share.link().is_none());

        let link = share.open_dialog().to_string();

        assert!(share.is_dialog_open());
        assert_eq!(share.link(), Some(link.as_str()));
        assert!(link.starts_with("https://glicemia-app.com/share/"));
    }

    #[tokio::test]
    async fn test_reopen_replaces_link() {
        let mut share = controller(MemoryClipboard::default());

        let first = share.open_dialog().to_string();
        share.close_dialog();
        assert!(share.link().is_none());
        let second = share.open_dialog().to_string();

        assert_ne!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_flag_then_clears_after_two_seconds() {
        let clipboard = MemoryClipboard::default();
        let mut share = controller(clipboard.clone());
        let link = share.open_dialog().to_string();

        assert_eq!(share.copy(&link).await, CopyOutcome::Copied);
        assert!(share.is_copied());
        assert_eq!(clipboard.contents(), Some(link));

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert!(share.is_copied());

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert!(!share.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_notifies_success() {
        let mut share = controller(MemoryClipboard::default());
        share.open_dialog();

        share.copy_current().await;

        let notes = share.notifier().notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, COPY_SUCCESS_TITLE);
        assert_eq!(notes[0].severity, Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_window() {
        let mut share = controller(MemoryClipboard::default());
        let link = share.open_dialog().to_string();

        share.copy(&link).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        share.copy(&link).await;

        tokio::time::sleep(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(share.is_copied());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        assert!(!share.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_clears_flag_and_cancels_timer() {
        let mut share = controller(MemoryClipboard::default());
        let link = share.open_dialog().to_string();
        share.copy(&link).await;

        share.close_dialog();
        share.open_dialog();
        assert!(!share.is_copied());

        let link = share.link().unwrap().to_string();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        share.copy(&link).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert!(share.is_copied());
    }

    #[tokio::test]
    async fn test_copy_failure_notifies_and_leaves_flag_unset() {
        let mut share = controller(MemoryClipboard::failing());
        let link = share.open_dialog().to_string();

        let outcome = share.copy(&link).await;

        assert!(matches!(outcome, CopyOutcome::Failed(ClipboardError::Denied(_))));
        assert!(!share.is_copied());
        let notes = share.notifier().notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, COPY_FAILURE_TITLE);
        assert_eq!(notes[0].severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn test_copy_current_without_dialog() {
        let mut share = controller(MemoryClipboard::default());
        assert!(share.copy_current().await.is_none());
        assert!(share.notifier().notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_copied_observes_auto_clear() {
        let mut share = controller(MemoryClipboard::default());
        let link = share.open_dialog().to_string();
        let mut rx = share.watch_copied();

        share.copy(&link).await;
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }
}
