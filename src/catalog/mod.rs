//! Voice catalog construction.
//!
//! Engines report voices as bare `{name, lang}` records. This module classifies them,
//! sorts them and groups them by language so a picker can show them, and chooses the
//! voice that should be selected by default.
//!
//! # Classification
//!
//! | Field | Derived from | Example (`"Microsoft Zira - English (United States)"`, `en-US`) |
//! |---|---|---|
//! | gender | lower-cased name against [`ClassificationTables`] | `female` |
//! | region | sub-tag after the first `-`, upper-cased (whole tag if none) | `US` |
//! | label | `"{name} ({lang})"` | `"Microsoft Zira - English (United States) (en-US)"` |
//! | group | display name of the primary language sub-tag | `"English"` |
//!
//! The female table is checked first, so a name matching both tables is `female`.
//!
//! # Ordering
//!
//! Entries are sorted by `(lang, gender, name)`, where gender compares as its lower-case
//! string (`"female" < "male" < "unknown"`). Groups keep that order internally and appear
//! in the order their first entry appears.
//!
//! # Default voice
//!
//! 1. first entry with a language tag starting with `en` and gender `female`
//! 2. otherwise the first entry whose tag starts with `en`
//! 3. otherwise the first entry
//! 4. otherwise none
//!
//! # Examples
//!
//! ```rust
//! use tts_playback::catalog::{RawVoice, VoiceCatalogBuilder};
//!
//! let build = VoiceCatalogBuilder::new().build(&[
//!     RawVoice::new("Microsoft David", "en-US"),
//!     RawVoice::new("Microsoft Zira", "en-US"),
//! ]);
//!
//! assert_eq!(build.catalog.entries()[0].name, "Microsoft Zira");
//! assert_eq!(build.default_selection.unwrap().as_str(), "Microsoft Zira");
//! ```

pub mod language;
pub mod tables;
pub mod voices;

pub use language::{load_language_names, LanguageNames};
pub use tables::{hardcoded_tables, load_tables, CatalogError, ClassificationTables};
pub use voices::{
    CatalogBuild, Gender, RawVoice, VoiceCatalog, VoiceCatalogBuilder, VoiceDescriptor, VoiceGroup,
};
