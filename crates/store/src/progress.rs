use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use motoquote_core::state::{ProgressStore, QuoteState, PROGRESS_KEY};

/// Durable wizard progress, persisted as a single JSON snapshot on disk.
///
/// Load and save are both best-effort: an unreadable or malformed snapshot
/// is logged and treated as absent so the wizard can always start fresh.
#[derive(Clone, Debug)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store the snapshot under `<dir>/motoquote-progress.json`.
    pub fn at_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{PROGRESS_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Option<QuoteState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "could not read saved progress");
                return None;
            }
        };

        match serde_json::from_str::<QuoteState>(&raw) {
            Ok(state) => Some(state),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "saved progress is malformed, starting over",
                );
                None
            }
        }
    }

    fn save(&self, state: &QuoteState) {
        let serialized = match serde_json::to_string_pretty(state) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(%error, "could not serialize progress snapshot");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(error) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), %error, "could not create progress directory");
                    return;
                }
            }
        }

        if let Err(error) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), %error, "could not write progress snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use motoquote_core::domain::{CoverageDraft, CoverageType, DurationMonths, PersonalDraft};
    use motoquote_core::state::{ProgressStore, QuoteState};
    use motoquote_core::wizard::WizardStep;

    use super::FileProgressStore;

    fn partially_filled_state() -> QuoteState {
        let mut state = QuoteState::initial();
        state.merge_personal_info(PersonalDraft {
            full_name: Some("Chanda Mwila".to_string()),
            ..PersonalDraft::default()
        });
        state.merge_coverage_info(CoverageDraft {
            coverage_type: Some(CoverageType::Comprehensive),
            duration: Some(DurationMonths::Six),
            ..CoverageDraft::default()
        });
        state.set_step(WizardStep::Coverage);
        state
    }

    #[test]
    fn round_trip_preserves_state() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileProgressStore::at_dir(dir.path());

        let state = partially_filled_state();
        store.save(&state);

        let reloaded = FileProgressStore::at_dir(dir.path());
        assert_eq!(reloaded.load(), Some(state));
    }

    #[test]
    fn missing_snapshot_loads_nothing() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileProgressStore::at_dir(dir.path());

        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_snapshot_falls_back_to_fresh_start() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileProgressStore::at_dir(dir.path());

        fs::write(store.path(), "{ this is not json").expect("write garbage snapshot");

        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileProgressStore::at_dir(dir.path().join("nested").join("progress"));

        store.save(&partially_filled_state());

        assert!(store.path().exists());
        assert!(store.load().is_some());
    }
}
