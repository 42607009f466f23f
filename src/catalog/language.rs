use std::collections::HashMap;
use std::path::Path;

use super::tables::CatalogError;
use crate::LanguageNameResolver;

/// Built-in language display names keyed by lower-case language code.
///
/// Unknown codes resolve to themselves.
#[derive(Debug, Clone)]
pub struct LanguageNames {
    names: HashMap<String, String>,
}

impl Default for LanguageNames {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageNames {
    pub fn new() -> Self {
        const BUILT_IN: &[(&str, &str)] = &[
            ("ar", "Arabic"),
            ("bg", "Bulgarian"),
            ("ca", "Catalan"),
            ("cmn", "Mandarin Chinese"),
            ("cs", "Czech"),
            ("da", "Danish"),
            ("de", "German"),
            ("el", "Greek"),
            ("en", "English"),
            ("es", "Spanish"),
            ("fi", "Finnish"),
            ("fr", "French"),
            ("he", "Hebrew"),
            ("hi", "Hindi"),
            ("hr", "Croatian"),
            ("hu", "Hungarian"),
            ("id", "Indonesian"),
            ("it", "Italian"),
            ("ja", "Japanese"),
            ("ko", "Korean"),
            ("ms", "Malay"),
            ("nb", "Norwegian Bokmål"),
            ("nl", "Dutch"),
            ("pl", "Polish"),
            ("pt", "Portuguese"),
            ("ro", "Romanian"),
            ("ru", "Russian"),
            ("sk", "Slovak"),
            ("sv", "Swedish"),
            ("th", "Thai"),
            ("tr", "Turkish"),
            ("uk", "Ukrainian"),
            ("vi", "Vietnamese"),
            ("yue", "Cantonese"),
            ("zh", "Chinese"),
        ];

        Self {
            names: BUILT_IN
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Add or override names from a JSON object mapping codes to display names.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), CatalogError> {
        let extra: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| CatalogError::Config(format!("Failed to parse JSON: {e}")))?;

        for (code, name) in extra {
            let code = code.trim().to_lowercase();
            if code.is_empty() {
                return Err(CatalogError::Config(format!(
                    "Empty language code for name {name:?}"
                )));
            }
            self.names.insert(code, name);
        }
        Ok(())
    }
}

impl LanguageNameResolver for LanguageNames {
    fn display_name_for(&self, code: &str) -> String {
        self.names
            .get(&code.to_lowercase())
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}

/// Load the built-in names extended with the entries of a JSON file.
pub fn load_language_names(path: &Path) -> Result<LanguageNames, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let mut names = LanguageNames::new();
    names.extend_from_json(&content)?;
    log::info!("Loaded language names from {}", path.display());
    Ok(names)
}
