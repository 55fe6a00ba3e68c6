use motoquote_core::config::AppConfig;
use motoquote_core::state::ProgressStore;
use motoquote_export::compose_quote_email;
use motoquote_store::FileProgressStore;

use crate::commands::CommandResult;

pub fn run(config: &AppConfig) -> CommandResult {
    let store = FileProgressStore::at_dir(&config.storage.data_dir);
    let Some(state) = store.load() else {
        return CommandResult::failure("no saved quote found, run `motoquote quote` first", 1);
    };
    let quote = match state.to_quote() {
        Ok(quote) => quote,
        Err(error) => {
            return CommandResult::failure(format!("quote is not ready to email: {error}"), 1);
        }
    };

    let draft = compose_quote_email(&quote, &config.branding);
    CommandResult::success(format!(
        "To: {}\nSubject: {}\n\n{}\n\nOpen in your mail client:\n{}",
        draft.to,
        draft.subject,
        draft.body,
        draft.mailto_url(),
    ))
}
