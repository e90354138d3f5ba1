use rafflebox_core::{PreferenceError, PreferenceStore};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn default_prefs_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("RAFFLEBOX_PREFS") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".rafflebox_prefs.json"))
}

/// Preferences kept as a flat JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Opens `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable preferences");
                }
                BTreeMap::new()
            }
        };
        Self { path, values }
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&body).map_err(|err| err.to_string())
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        let body = serde_json::to_string_pretty(&self.values)
            .map_err(|err| PreferenceError::Encode(err.to_string()))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}
