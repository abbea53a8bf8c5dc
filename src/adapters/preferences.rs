use serde::{Deserialize, Serialize};

use crate::core::i18n::Language;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    language: Option<String>,
}

/// Persists the one user preference: display language.
pub struct PreferenceStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Missing file, unreadable JSON or an unknown code all give English.
    pub async fn load_language(&self) -> Language {
        let bytes = match self.storage.read_file(PREFERENCES_FILE).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("No stored preferences ({}), using default language", e);
                return Language::default();
            }
        };

        match serde_json::from_slice::<StoredPreferences>(&bytes) {
            Ok(prefs) => Language::resolve(prefs.language.as_deref()),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences file: {}", e);
                Language::default()
            }
        }
    }

    pub async fn save_language(&self, language: Language) -> Result<()> {
        let prefs = StoredPreferences {
            language: Some(language.code().to_string()),
        };
        let json = serde_json::to_vec_pretty(&prefs)?;
        self.storage.write_file(PREFERENCES_FILE, &json).await?;
        tracing::debug!("Saved language preference: {}", language);
        Ok(())
    }
}
