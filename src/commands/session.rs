use clap::Args;
use glicemia_core::{DatePicker, Intent, PointerListeners, PointerTarget, Session, View};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::record::{parse_selectable_date, OutputFormat};
use super::{open_store, share_controller};
use crate::config::Config;
use crate::render::{render_records, render_view, TerminalNotifier};

const HELP: &str = "\
Commands:
  calendar, c        Open or close the calendar
  pick YYYY-MM-DD    Pick a date (calendar must be open)
  outside            Click outside the calendar
  inside             Click inside the calendar
  level TEXT         Type into the glucose level field
  save               Save the level for the active date
  share              Open the share dialog with a new link
  copy               Copy the share link
  close              Close the share dialog
  list               Show records
  help               Show this help
  quit               Leave the session";

/// A parsed line of session input.
#[derive(Debug, PartialEq)]
enum Action {
    Intent(Intent),
    List,
    Help,
    Quit,
}

#[derive(Args)]
pub struct SessionCommand {
    /// Output format for the screen after each command
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SessionCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let notifier = match self.format {
            OutputFormat::Text => TerminalNotifier::default(),
            OutputFormat::Json => TerminalNotifier::json(),
        };
        let picker = DatePicker::new(PointerListeners::new());
        let mut session = Session::new(open_store(config), picker, share_controller(config, notifier));
        session.store_mut().subscribe(|records| {
            tracing::debug!("Record list changed: {} record(s)", records.len());
        });

        if self.format == OutputFormat::Text {
            println!("{}", HELP);
            println!();
        }
        println!("{}", show_view(&session.view(), self.format)?);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if self.format == OutputFormat::Text {
                print!("> ");
                std::io::stdout().flush()?;
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let action = match parse_line(&line) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };

            match action {
                Action::Quit => break,
                Action::Help => println!("{}", HELP),
                Action::List => match self.format {
                    OutputFormat::Text => print!("{}", render_records(session.store().records())),
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string(session.store().records())?)
                    }
                },
                Action::Intent(intent) => {
                    if let Some(message) = precondition(&session.view(), &intent) {
                        println!("{}", message);
                        continue;
                    }
                    // Pointer events only reach the picker while it listens.
                    if matches!(intent, Intent::PointerDown(_))
                        && session.picker().listeners().active() == 0
                    {
                        continue;
                    }
                    if let Err(e) = session.handle(intent).await {
                        println!("Error: {}", e);
                    }
                    println!("{}", show_view(&session.view(), self.format)?);
                }
            }
        }

        Ok(())
    }
}

fn show_view(view: &View, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_view(view).trim_end().to_string()),
        OutputFormat::Json => serde_json::to_string(view),
    }
}

/// Explains why an intent the presentation would not offer is unavailable.
fn precondition(view: &View, intent: &Intent) -> Option<&'static str> {
    match intent {
        Intent::SelectDate(_) if !view.calendar_open => Some("Open the calendar first."),
        Intent::Copy if !view.share_dialog_open => Some("Open the share dialog first."),
        _ => None,
    }
}

fn parse_line(line: &str) -> Result<Option<Action>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "calendar" | "c" => Action::Intent(Intent::ToggleCalendar),
        "pick" => Action::Intent(Intent::SelectDate(parse_selectable_date(rest)?)),
        "outside" => Action::Intent(Intent::PointerDown(PointerTarget::Outside)),
        "inside" => Action::Intent(Intent::PointerDown(PointerTarget::Overlay)),
        "level" => Action::Intent(Intent::LevelInput(rest.to_string())),
        "save" => Action::Intent(Intent::Save),
        "share" => Action::Intent(Intent::Share),
        "copy" => Action::Intent(Intent::Copy),
        "close" => Action::Intent(Intent::CloseShare),
        "list" | "ls" => Action::List,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };

    Ok(Some(action))
}
