use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Args, ValueEnum};
use glicemia_core::{is_selectable, AppendOutcome, DatePicker, PointerListeners, RecordStore};

use crate::render::render_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct AddCommand {
    /// Glucose level in mg/dL
    pub level: String,

    /// Date of the measurement (YYYY-MM-DD), defaults to now
    #[arg(long, short)]
    pub date: Option<String>,
}

impl AddCommand {
    pub fn run(&self, store: &mut RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        let mut picker = DatePicker::new(PointerListeners::new());

        if let Some(date_str) = &self.date {
            let date = parse_date(date_str)?;
            picker.toggle();
            if !picker.select(date) {
                return Err(format!(
                    "Date '{}' is not available. Pick a day between 1900-01-01 and today.",
                    date_str
                )
                .into());
            }
        }

        let date = picker.active_date();
        if store.append(date, &self.level)? == AppendOutcome::Added {
            let local = date.with_timezone(&Local);
            println!(
                "Saved {} mg/dL for {}",
                self.level.trim(),
                local.format("%d/%m/%Y %H:%M:%S")
            );
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(store.records())?);
            }
            OutputFormat::Text => {
                println!("Records");
                println!("{}", "=".repeat(40));
                print!("{}", render_records(store.records()));
            }
        }
        Ok(())
    }
}

/// Parses `YYYY-MM-DD` as local midnight.
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", date_str))?;
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();

    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    Ok(local)
}

/// Parses a date and checks the picker would offer it.
pub fn parse_selectable_date(date_str: &str) -> Result<DateTime<Utc>, String> {
    let date = parse_date(date_str)?;
    if !is_selectable(date, Utc::now()) {
        return Err(format!(
            "Date '{}' is not available. Pick a day between 1900-01-01 and today.",
            date_str
        ));
    }
    Ok(date)
}
