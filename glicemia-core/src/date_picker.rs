//! Date selection with a transient picker overlay.
//!
//! While the overlay is open it holds a [`ListenerGuard`] for the outside
//! pointer listener. Closing the overlay or dropping the picker releases it.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where a pointer-down landed relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Overlay,
    Outside,
}

/// Registry of outside-pointer listeners.
///
/// The presentation layer only needs to route pointer-down events to the
/// picker while [`PointerListeners::active`] is non-zero.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    active: Arc<AtomicUsize>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener that stays active until the guard is dropped.
    pub fn register(&self) -> ListenerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            active: Arc::clone(&self.active),
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ListenerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
enum Overlay {
    Closed,
    Open(ListenerGuard),
}

/// Earliest date the picker offers.
pub fn earliest_selectable() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether the picker offers `date`: not after `now` and not before 1900.
pub fn is_selectable(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date <= now && date >= earliest_selectable()
}

#[derive(Debug)]
pub struct DatePicker {
    active_date: DateTime<Utc>,
    overlay: Overlay,
    listeners: PointerListeners,
}

impl DatePicker {
    /// Creates a closed picker whose active date is now.
    pub fn new(listeners: PointerListeners) -> Self {
        Self::with_active_date(Utc::now(), listeners)
    }

    pub fn with_active_date(active_date: DateTime<Utc>, listeners: PointerListeners) -> Self {
        Self {
            active_date,
            overlay: Overlay::Closed,
            listeners,
        }
    }

    pub fn active_date(&self) -> DateTime<Utc> {
        self.active_date
    }

    pub fn is_open(&self) -> bool {
        matches!(self.overlay, Overlay::Open(_))
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    /// Flips the overlay between open and closed.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.overlay = Overlay::Open(self.listeners.register());
            tracing::trace!("Date picker opened");
        }
    }

    /// Commits `date` and closes the overlay.
    ///
    /// Returns false, changing nothing, when the overlay is closed or the date
    /// is not one the picker offers.
    ///
    /// The offered range is [`is_selectable`]; a front end that only presents
    /// those dates never sees a rejected select while the overlay is open.
    pub fn select(&mut self, date: DateTime<Utc>) -> bool {
        self.select_at(date, Utc::now())
    }

    /// [`select`](Self::select) against an explicit `now`.
    pub fn select_at(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if !self.is_open() || !is_selectable(date, now) {
            return false;
        }

        self.active_date = date;
        self.close();
        true
    }

    /// Handles a pointer-down. Only an outside hit on an open overlay closes it.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside && self.is_open() {
            self.close();
        }
    }

    fn close(&mut self) {
        self.overlay = Overlay::Closed;
        tracing::trace!("Date picker closed");
    }
}
