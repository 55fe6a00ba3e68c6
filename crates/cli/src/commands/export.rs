use chrono::Utc;

use motoquote_core::config::AppConfig;
use motoquote_core::state::ProgressStore;
use motoquote_export::{DocumentRenderer, ExportError};
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
            return CommandResult::failure(format!("quote is not ready to export: {error}"), 1);
        }
    };

    let renderer = match config.export.wkhtmltopdf_path.clone() {
        Some(path) => DocumentRenderer::with_wkhtmltopdf(Some(path)),
        None => DocumentRenderer::new(),
    };
    let renderer = match renderer {
        Ok(renderer) => renderer,
        Err(error) => {
            return CommandResult::failure(format!("could not prepare the renderer: {error}"), 1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let written = runtime.block_on(async {
        let document = renderer
            .generate_quote_document(&quote, &config.branding, Utc::now())
            .await?;
        let path = document.write_to_dir(&config.export.output_dir).await?;
        Ok::<_, ExportError>((document.quote_number, path))
    });

    match written {
        Ok((quote_number, path)) => {
            CommandResult::success(format!("Quote {} exported to {}", quote_number, path.display()))
        }
        Err(error) => CommandResult::failure(format!("export failed: {error}"), 1),
    }
}
