use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AskError, Result};

const SETTINGS_FILE: &str = "settings.json";

/// The three strings the pipeline needs, read once at startup and passed
/// by value into the turn. Not revalidated afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub context_file_path: String,
    pub model_path: String,
    pub system_prompt: String,
}

#[derive(Deserialize)]
struct SettingsDocument {
    #[serde(rename = "Settings")]
    settings: Settings,
}

impl Settings {
    /// Read `settings.json` from the executable's directory.
    pub fn load() -> Result<Self> {
        let exe = env::current_exe()
            .map_err(|e| AskError::Config(format!("cannot locate executable: {e}")))?;
        let dir = exe
            .parent()
            .ok_or_else(|| AskError::Config("executable has no parent directory".into()))?;
        Self::from_path(&dir.join(SETTINGS_FILE))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AskError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: SettingsDocument = serde_json::from_str(raw)
            .map_err(|e| AskError::Config(format!("invalid settings document: {e}")))?;
        doc.settings.validated()
    }

    fn validated(self) -> Result<Self> {
        for (key, value) in [
            ("ContextFilePath", &self.context_file_path),
            ("ModelPath", &self.model_path),
            ("SystemPrompt", &self.system_prompt),
        ] {
            if value.is_empty() {
                return Err(AskError::Config(format!(
                    "Settings.{key} must be a non-empty string"
                )));
            }
        }
        Ok(self)
    }
}
