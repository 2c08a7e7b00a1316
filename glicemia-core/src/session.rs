//! A single user's session: the record form, the date picker and the share
//! dialog, driven by user intents.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::date_picker::{DatePicker, PointerTarget};
use crate::models::GlicemiaRecord;
use crate::notify::Notifier;
use crate::share::{Clipboard, CopyOutcome, ShareController};
use crate::store::{AppendOutcome, RecordStore, StoreError};

/// Something the user did in the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ToggleCalendar,
    SelectDate(DateTime<Utc>),
    PointerDown(PointerTarget),
    LevelInput(String),
    Save,
    Share,
    CloseShare,
    Copy,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub active_date: DateTime<Utc>,
    pub calendar_open: bool,
    pub level_input: String,
    pub records: Vec<GlicemiaRecord>,
    pub share_dialog_open: bool,
    pub share_link: Option<String>,
    pub copied: bool,
}

pub struct Session<C, N> {
    store: RecordStore,
    picker: DatePicker,
    share: ShareController<C, N>,
    level_input: String,
}

impl<C: Clipboard, N: Notifier> Session<C, N> {
    pub fn new(store: RecordStore, picker: DatePicker, share: ShareController<C, N>) -> Self {
        Self {
            store,
            picker,
            share,
            level_input: String::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn share(&self) -> &ShareController<C, N> {
        &self.share
    }

    pub fn level_input(&self) -> &str {
        &self.level_input
    }

    /// Applies one intent.
    ///
    /// Only a failed persistence write is returned as an error; every other
    /// failure degrades to a no-op or is reported through the notifier.
    pub async fn handle(&mut self, intent: Intent) -> Result<(), StoreError> {
        match intent {
            Intent::ToggleCalendar => self.picker.toggle(),
            Intent::SelectDate(date) => {
                self.picker.select(date);
            }
            Intent::PointerDown(target) => self.picker.pointer_down(target),
            Intent::LevelInput(text) => self.level_input = text,
            Intent::Save => {
                self.save()?;
            }
            Intent::Share => {
                self.share.open_dialog();
            }
            Intent::CloseShare => self.share.close_dialog(),
            Intent::Copy => {
                self.copy().await;
            }
        }
        Ok(())
    }

    /// Saves the level input against the active date. The input is cleared
    /// only when a record was added.
    pub fn save(&mut self) -> Result<AppendOutcome, StoreError> {
        let outcome = self.store.append(self.picker.active_date(), &self.level_input)?;
        if outcome == AppendOutcome::Added {
            self.level_input.clear();
        }
        Ok(outcome)
    }

    pub async fn copy(&mut self) -> Option<CopyOutcome> {
        self.share.copy_current().await
    }

    pub fn view(&self) -> View {
        View {
            active_date: self.picker.active_date(),
            calendar_open: self.picker.is_open(),
            level_input: self.level_input.clone(),
            records: self.store.records().to_vec(),
            share_dialog_open: self.share.is_dialog_open(),
            share_link: self.share.link().map(str::to_string),
            copied: self.share.is_copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::PointerListeners;
    use crate::share::LinkGenerator;
    use crate::storage::{BlobStorage, RECORDS_KEY};
    use crate::testing::{MemoryClipboard, MemoryStorage, RecordingNotifier};
    use chrono::TimeZone;
    use std::time::Duration;

    type TestSession = Session<MemoryClipboard, RecordingNotifier>;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn session(storage: MemoryStorage) -> TestSession {
        let store = RecordStore::load(storage);
        let picker = DatePicker::with_active_date(at(2024, 5, 10), PointerListeners::new());
        let share = ShareController::new(
            LinkGenerator::default(),
            MemoryClipboard::default(),
            RecordingNotifier::default(),
        );
        Session::new(store, picker, share)
    }

    #[tokio::test]
    async fn test_pick_date_then_save() {
        let storage = MemoryStorage::default();
        let mut session = session(storage.clone());

        session.handle(Intent::ToggleCalendar).await.unwrap();
        session.handle(Intent::SelectDate(at(2024, 3, 1))).await.unwrap();
        session.handle(Intent::LevelInput("5.5".into())).await.unwrap();
        session.handle(Intent::Save).await.unwrap();

        session.handle(Intent::ToggleCalendar).await.unwrap();
        session.handle(Intent::SelectDate(at(2024, 2, 15))).await.unwrap();
        session.handle(Intent::LevelInput("6.0".into())).await.unwrap();
        session.handle(Intent::Save).await.unwrap();

        let view = session.view();
        assert_eq!(
            view.records,
            vec![
                GlicemiaRecord::new(at(2024, 3, 1), 5.5),
                GlicemiaRecord::new(at(2024, 2, 15), 6.0),
            ]
        );
        assert!(view.level_input.is_empty());
        assert!(!view.calendar_open);
        assert_eq!(storage.writes(), 2);
    }

    #[tokio::test]
    async fn test_invalid_save_keeps_input() {
        let storage = MemoryStorage::default();
        let mut session = session(storage.clone());

        session.handle(Intent::LevelInput("abc".into())).await.unwrap();
        session.handle(Intent::Save).await.unwrap();

        assert_eq!(session.level_input(), "abc");
        assert!(session.store().is_empty());
        assert!(storage.read(RECORDS_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_outside_pointer_closes_calendar() {
        let mut session = session(MemoryStorage::default());

        session.handle(Intent::ToggleCalendar).await.unwrap();
        assert!(session.view().calendar_open);
        session
            .handle(Intent::PointerDown(PointerTarget::Outside))
            .await
            .unwrap();

        let view = session.view();
        assert!(!view.calendar_open);
        assert_eq!(view.active_date, at(2024, 5, 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_share_and_copy() {
        let mut session = session(MemoryStorage::default());

        session.handle(Intent::Share).await.unwrap();
        let link = session.view().share_link.unwrap();
        session.handle(Intent::Copy).await.unwrap();

        let view = session.view();
        assert!(view.share_dialog_open);
        assert!(view.copied);
        assert_eq!(session.share().clipboard().contents(), Some(link));

        tokio::time::sleep(Duration::from_millis(2100)).await;
        tokio::task::yield_now().await;
        assert!(!session.view().copied);

        session.handle(Intent::CloseShare).await.unwrap();
        let view = session.view();
        assert!(!view.share_dialog_open);
        assert!(view.share_link.is_none());
    }
}
