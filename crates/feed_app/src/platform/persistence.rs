use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use feed_core::CatalogKey;
use feed_engine::AtomicFileWriter;
use feed_logging::{feed_error, feed_info, feed_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".feed_state.ron";
const LAST_SELECTED: &str = "last_selected";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedValue {
    value: String,
    saved_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    entries: BTreeMap<String, PersistedValue>,
}

fn load_state(writer: &AtomicFileWriter) -> Option<PersistedState> {
    let content = match writer.read(STATE_FILENAME) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            feed_warn!(
                "Failed to read persisted state from {:?}: {}",
                writer.dir(),
                err
            );
            return None;
        }
    };

    match ron::from_str(&content) {
        Ok(state) => Some(state),
        Err(err) => {
            feed_warn!(
                "Failed to parse persisted state in {:?}: {}",
                writer.dir(),
                err
            );
            None
        }
    }
}

/// The key stored under `last_selected`, if any.
pub(crate) fn load_selection(state_dir: &Path) -> Option<CatalogKey> {
    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    let state = load_state(&writer)?;
    let entry = state.entries.get(LAST_SELECTED)?;
    let key = CatalogKey::new(entry.value.clone());
    if key.is_blank() {
        return None;
    }
    feed_info!("Restored last selection {} (saved {})", key, entry.saved_at);
    Some(key)
}

/// Stores `key` under `last_selected`, keeping any other entries in the file.
pub(crate) fn save_selection(state_dir: &Path, key: &CatalogKey) {
    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    let mut state = load_state(&writer).unwrap_or_default();
    state.entries.insert(
        LAST_SELECTED.to_string(),
        PersistedValue {
            value: key.as_str().to_string(),
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        },
    );

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            feed_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        feed_error!(
            "Failed to write persisted state to {:?}: {}",
            state_dir,
            err
        );
    }
}
