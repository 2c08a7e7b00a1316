mod config_cmd;
mod record;
mod session;
mod share;

pub use config_cmd::ConfigCommand;
pub use record::{AddCommand, ListCommand};
pub use session::SessionCommand;
pub use share::ShareCommand;

use glicemia_core::{FileStorage, LinkGenerator, RecordStore, ShareController};

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::render::TerminalNotifier;

/// Loads the record store from the configured data directory.
pub fn open_store(config: &Config) -> RecordStore {
    RecordStore::load(FileStorage::new(config.data_dir.value.clone()))
}

pub fn share_controller(
    config: &Config,
    notifier: TerminalNotifier,
) -> ShareController<SystemClipboard, TerminalNotifier> {
    ShareController::new(
        LinkGenerator::new(config.share_base_url.value.clone()),
        SystemClipboard::new(config.clipboard.value),
        notifier,
    )
}
