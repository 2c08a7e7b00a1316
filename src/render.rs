//! Terminal rendering of session state and notifications.

use chrono::Local;
use glicemia_core::{GlicemiaRecord, Notification, Notifier, Severity, View, LINK_EXPIRY_NOTICE};
use std::fmt::Write;

/// Prints notifications as single lines. Destructive ones go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    json: bool,
}

impl TerminalNotifier {
    /// Prints each notification as a JSON object instead of text.
    pub fn json() -> Self {
        Self { json: true }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = if self.json {
            match serde_json::to_string(&notification) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to serialize notification: {}", e);
                    format_notification(&notification)
                }
            }
        } else {
            format_notification(&notification)
        };

        match notification.severity {
            Severity::Info => println!("{}", line),
            Severity::Destructive => eprintln!("{}", line),
        }
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Info => "*",
        Severity::Destructive => "!",
    };
    format!(
        "{} {} {}",
        marker, notification.title, notification.description
    )
}

pub fn render_records(records: &[GlicemiaRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No records yet.\n");
        return out;
    }
    for record in records {
        let _ = writeln!(out, "  {}", record);
    }
    let _ = writeln!(out, "\nTotal: {} record(s)", records.len());
    out
}

pub fn render_view(view: &View) -> String {
    let mut out = String::new();

    let date = view.active_date.with_timezone(&Local).format("%d/%m/%Y");
    let calendar = if view.calendar_open { "open" } else { "closed" };
    let _ = writeln!(out, "Date: {} (calendar {})", date, calendar);
    let _ = writeln!(out, "Level: [{}] mg/dL", view.level_input);
    let _ = writeln!(out, "{}", "-".repeat(40));
    out.push_str(&render_records(&view.records));

    if view.share_dialog_open {
        let _ = writeln!(out, "{}", "-".repeat(40));
        let _ = writeln!(out, "Share link: {}", view.share_link.as_deref().unwrap_or(""));
        let _ = writeln!(out, "  {}", LINK_EXPIRY_NOTICE);
        if view.copied {
            let _ = writeln!(out, "  [copied]");
        }
    }

    out
}
