//! In-memory collaborators shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::notify::{Notification, Notifier};
use crate::share::{Clipboard, ClipboardError};
use crate::storage::{BlobStorage, StorageError};

#[derive(Clone, Default)]
pub struct MemoryStorage {
    blobs: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl BlobStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

pub struct FailingStorage;

impl BlobStorage for FailingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::IoError(
            PathBuf::from(key),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read denied"),
        ))
    }

    fn write(&self, _key: &str, _contents: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("write denied".to_string()))
    }
}

#[derive(Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn failing() -> Self {
        Self {
            contents: Arc::default(),
            fail: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Denied("test clipboard".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
