//! System clipboard access for the terminal.

use base64::{engine::general_purpose::STANDARD, Engine};
use glicemia_core::{Clipboard, ClipboardError};
use std::io;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ClipboardBackend;

/// Copy commands tried in order by [`ClipboardBackend::Auto`].
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

#[derive(Debug, Clone)]
pub struct SystemClipboard {
    backend: ClipboardBackend,
}

impl SystemClipboard {
    pub fn new(backend: ClipboardBackend) -> Self {
        Self { backend }
    }

    async fn write_with_command(&self, text: &str) -> Result<(), ClipboardError> {
        for (program, args) in COPY_COMMANDS {
            let child = Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match child {
                Ok(child) => child,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ClipboardError::Denied(format!("{}: {}", program, e))),
            };

            tracing::debug!("Copying with {}", program);

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| ClipboardError::Denied(format!("{}: {}", program, e)))?;
            }

            let status = child
                .wait()
                .await
                .map_err(|e| ClipboardError::Denied(format!("{}: {}", program, e)))?;

            return if status.success() {
                Ok(())
            } else {
                Err(ClipboardError::Denied(format!(
                    "{} exited with {}",
                    program, status
                )))
            };
        }

        Err(ClipboardError::Unavailable(
            "no clipboard command found (tried pbcopy, wl-copy, xclip, xsel, clip)".to_string(),
        ))
    }

    async fn write_with_osc52(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .await
            .map_err(|e| ClipboardError::Unavailable(format!("terminal: {}", e)))?;
        stdout
            .flush()
            .await
            .map_err(|e| ClipboardError::Unavailable(format!("terminal: {}", e)))
    }
}

impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        match self.backend {
            ClipboardBackend::Auto => self.write_with_command(text).await,
            ClipboardBackend::Osc52 => self.write_with_osc52(text).await,
        }
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x1b\\", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        let seq = osc52_sequence("https://glicemia-app.com/share/abc");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with("\x1b\\"));
        assert!(seq.contains("aHR0cHM6Ly9nbGljZW1pYS1hcHAuY29tL3NoYXJlL2FiYw=="));
    }
}
