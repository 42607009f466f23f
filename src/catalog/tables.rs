use std::path::Path;

use serde::Deserialize;

use super::voices::Gender;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog configuration: {0}")]
    Config(String),
}

/// Keyword tables used to infer a voice's gender from its name.
///
/// A name is `female` if it contains any female token, else `male` if it contains any
/// male token, else `unknown`. Matching is a lower-case substring test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassificationTables {
    #[serde(default)]
    pub female: Vec<String>,
    #[serde(default)]
    pub male: Vec<String>,
}

impl Default for ClassificationTables {
    fn default() -> Self {
        hardcoded_tables()
    }
}

impl ClassificationTables {
    /// Parse tables from a JSON document of the form `{"female": [...], "male": [...]}`.
    ///
    /// Tokens are lower-cased and trimmed; an empty token would match every name and is
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: ClassificationTables = serde_json::from_str(json)
            .map_err(|e| CatalogError::Config(format!("Failed to parse JSON: {e}")))?;

        Ok(Self {
            female: normalize_tokens(raw.female, "female")?,
            male: normalize_tokens(raw.male, "male")?,
        })
    }

    pub fn classify(&self, name: &str) -> Gender {
        let lower = name.to_lowercase();
        if self.female.iter().any(|t| lower.contains(t.as_str())) {
            Gender::Female
        } else if self.male.iter().any(|t| lower.contains(t.as_str())) {
            Gender::Male
        } else {
            Gender::Unknown
        }
    }
}

fn normalize_tokens(tokens: Vec<String>, table: &str) -> Result<Vec<String>, CatalogError> {
    tokens
        .into_iter()
        .map(|t| {
            let t = t.trim().to_lowercase();
            if t.is_empty() {
                Err(CatalogError::Config(format!("Empty token in '{table}' table")))
            } else {
                Ok(t)
            }
        })
        .collect()
}

/// Load classification tables from a JSON file.
pub fn load_tables(path: &Path) -> Result<ClassificationTables, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let tables = ClassificationTables::from_json(&content)?;
    log::info!(
        "Loaded classification tables from {} ({} female, {} male tokens)",
        path.display(),
        tables.female.len(),
        tables.male.len()
    );
    Ok(tables)
}

/// Built-in tables covering the voice packs shipped by common platforms
/// (Windows, macOS/iOS, Android/Chrome).
pub fn hardcoded_tables() -> ClassificationTables {
    const FEMALE: &[&str] = &[
        "female", "woman", "girl", "zira", "hazel", "susan", "heera", "catherine", "linda",
        "samantha", "victoria", "karen", "moira", "tessa", "fiona", "veena", "allison",
        "serena", "kate", "alice", "amelie", "anna", "ellen", "ioana", "joana", "laura",
        "luciana", "mariska", "melina", "milena", "monica", "nora", "paulina", "sara", "satu",
        "yelda", "yuna", "zosia", "zuzana", "kyoko", "helena", "sabina", "hortense", "elsa",
        "haruka", "huihui", "yaoyao", "heami", "irina", "paola",
    ];
    const MALE: &[&str] = &[
        "male", "david", "mark", "george", "james", "richard", "daniel", "alex", "fred",
        "thomas", "jorge", "diego", "juan", "luca", "xander", "yuri", "maged", "rishi",
        "aaron", "arthur", "gordon", "oliver", "ravi", "paul", "pablo", "stefan", "ichiro",
        "kangkang", "pavel", "filip", "claude", "cosimo", "raul", "sean",
    ];

    ClassificationTables {
        female: FEMALE.iter().map(|s| s.to_string()).collect(),
        male: MALE.iter().map(|s| s.to_string()).collect(),
    }
}
