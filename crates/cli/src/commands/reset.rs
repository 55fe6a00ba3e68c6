use motoquote_core::config::AppConfig;
use motoquote_core::wizard::WizardSession;
use motoquote_store::FileProgressStore;

use crate::commands::CommandResult;

pub fn run(config: &AppConfig) -> CommandResult {
    let store = FileProgressStore::at_dir(&config.storage.data_dir);
    let mut session = WizardSession::resume_or_start(store);
    session.restart();

    CommandResult::success("Saved progress cleared. Run `motoquote quote` to start a new quote.")
}
