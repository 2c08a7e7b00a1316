use clap::Args;
use glicemia_core::{CopyOutcome, LINK_EXPIRY_NOTICE};

use super::share_controller;
use crate::config::Config;
use crate::render::TerminalNotifier;

#[derive(Args)]
pub struct ShareCommand {
    /// Copy the link to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl ShareCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut share = share_controller(config, TerminalNotifier::default());

        let link = share.open_dialog().to_string();
        println!("Share link: {}", link);
        println!("  {}", LINK_EXPIRY_NOTICE);

        if self.copy {
            // Failures are reported by the notifier.
            if let Some(CopyOutcome::Failed(e)) = share.copy_current().await {
                tracing::debug!("Share copy failed: {}", e);
            }
        }

        Ok(())
    }
}
