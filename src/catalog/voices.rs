use std::fmt;

use serde::{Deserialize, Serialize};

use super::language::LanguageNames;
use super::tables::ClassificationTables;
use crate::{LanguageNameResolver, VoiceHandle};

/// A voice as reported by the voice source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawVoice {
    pub name: String,
    pub lang: String,
}

impl RawVoice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, displayable voice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceDescriptor {
    pub handle: VoiceHandle,
    pub name: String,
    pub lang: String,
    pub gender: Gender,
    pub region: String,
    pub label: String,
}

/// Voices sharing one resolved language name, as indices into [`VoiceCatalog::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceGroup {
    pub language: String,
    members: Vec<usize>,
}

impl VoiceGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Sorted, grouped voices at one point in time.
///
/// A catalog is never modified; a changed voice list produces a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceCatalog {
    entries: Vec<VoiceDescriptor>,
    groups: Vec<VoiceGroup>,
}

impl VoiceCatalog {
    pub fn entries(&self) -> &[VoiceDescriptor] {
        &self.entries
    }

    pub fn groups(&self) -> &[VoiceGroup] {
        &self.groups
    }

    /// Entries of `group`, in catalog order.
    pub fn group_entries<'a>(
        &'a self,
        group: &'a VoiceGroup,
    ) -> impl Iterator<Item = &'a VoiceDescriptor> + 'a {
        group.members.iter().filter_map(|&i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, handle: &VoiceHandle) -> Option<&VoiceDescriptor> {
        self.entries.iter().find(|v| &v.handle == handle)
    }

    /// Resolve a user-facing voice string.
    ///
    /// An exact name match wins. Otherwise the first voice whose name contains the query's
    /// first word or whose language tag equals the query, whichever comes first in the
    /// catalog.
    pub fn find(&self, query: &str) -> Option<&VoiceDescriptor> {
        let query = query.trim();
        let first_word = query.split_whitespace().next()?;

        self.entries.iter().find(|v| v.name == query).or_else(|| {
            self.entries
                .iter()
                .find(|v| v.name.contains(first_word) || v.lang == query)
        })
    }

    /// The voice to select after a rebuild.
    pub fn default_voice(&self) -> Option<&VoiceDescriptor> {
        let english = |v: &&VoiceDescriptor| v.lang.starts_with("en");

        self.entries
            .iter()
            .filter(english)
            .find(|v| v.gender == Gender::Female)
            .or_else(|| self.entries.iter().find(english))
            .or_else(|| self.entries.first())
    }
}

/// Result of one catalog build.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBuild {
    pub catalog: VoiceCatalog,
    pub default_selection: Option<VoiceHandle>,
}

/// Builds [`VoiceCatalog`]s from raw voice snapshots.
pub struct VoiceCatalogBuilder {
    tables: ClassificationTables,
    resolver: Box<dyn LanguageNameResolver>,
}

impl Default for VoiceCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceCatalogBuilder {
    /// Builder using the built-in tables and language names.
    pub fn new() -> Self {
        Self {
            tables: ClassificationTables::default(),
            resolver: Box::new(LanguageNames::new()),
        }
    }

    pub fn with_tables(mut self, tables: ClassificationTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_resolver(mut self, resolver: impl LanguageNameResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn tables(&self) -> &ClassificationTables {
        &self.tables
    }

    pub fn describe(&self, raw: &RawVoice) -> VoiceDescriptor {
        VoiceDescriptor {
            handle: VoiceHandle::new(raw.name.clone()),
            name: raw.name.clone(),
            lang: raw.lang.clone(),
            gender: self.tables.classify(&raw.name),
            region: region_code(&raw.lang),
            label: format!("{} ({})", raw.name, raw.lang),
        }
    }

    /// Classify, sort and group a snapshot, and pick its default voice.
    pub fn build(&self, raw: &[RawVoice]) -> CatalogBuild {
        let mut entries: Vec<VoiceDescriptor> = raw.iter().map(|v| self.describe(v)).collect();
        entries.sort_by(|a, b| {
            a.lang
                .cmp(&b.lang)
                .then_with(|| a.gender.as_str().cmp(b.gender.as_str()))
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut groups: Vec<VoiceGroup> = Vec::new();
        for (i, voice) in entries.iter().enumerate() {
            let language = self.resolver.display_name_for(language_code(&voice.lang));
            match groups.iter_mut().find(|g| g.language == language) {
                Some(group) => group.members.push(i),
                None => groups.push(VoiceGroup {
                    language,
                    members: vec![i],
                }),
            }
        }

        let catalog = VoiceCatalog { entries, groups };
        let default_selection = catalog.default_voice().map(|v| v.handle.clone());

        log::info!(
            "Built voice catalog: {} voices in {} languages, default {:?}",
            catalog.len(),
            catalog.groups.len(),
            default_selection.as_ref().map(VoiceHandle::as_str)
        );

        CatalogBuild {
            catalog,
            default_selection,
        }
    }
}

/// Primary language sub-tag (`"en"` for `"en-US"`).
fn language_code(lang: &str) -> &str {
    lang.split('-').next().unwrap_or(lang)
}

/// Upper-cased sub-tag after the first hyphen, or the whole tag when it is missing or empty.
fn region_code(lang: &str) -> String {
    match lang.split('-').nth(1).filter(|sub| !sub.is_empty()) {
        Some(sub) => sub.to_uppercase(),
        None => lang.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::{region_code, Gender, RawVoice, VoiceCatalogBuilder};
    use crate::catalog::ClassificationTables;
    use crate::{LanguageNameResolver, VoiceHandle};

    fn sample_voices() -> Vec<RawVoice> {
        vec![
            RawVoice::new("Microsoft David", "en-US"),
            RawVoice::new("Google français", "fr-FR"),
            RawVoice::new("Google US English", "en-US"),
            RawVoice::new("Microsoft Zira", "en-US"),
            RawVoice::new("Daniel", "en-GB"),
            RawVoice::new("Amelie", "fr-CA"),
            RawVoice::new("Google UK English Female", "en-GB"),
        ]
    }

    fn names(build: &super::CatalogBuild) -> Vec<&str> {
        build.catalog.entries().iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_lang_then_gender_string_then_name() {
        let build = VoiceCatalogBuilder::new().build(&sample_voices());
        assert_eq!(
            names(&build),
            vec![
                "Google UK English Female",
                "Daniel",
                "Microsoft Zira",
                "Microsoft David",
                "Google US English",
                "Amelie",
                "Google français",
            ]
        );
    }

    #[test]
    fn build_is_reproducible_regardless_of_input_order() {
        let builder = VoiceCatalogBuilder::new();
        let mut reversed = sample_voices();
        reversed.reverse();
        assert_eq!(builder.build(&sample_voices()), builder.build(&reversed));
    }

    #[test]
    fn describes_region_label_and_gender() {
        let voice = VoiceCatalogBuilder::new().describe(&RawVoice::new("Microsoft Zira", "en-US"));
        assert_eq!(voice.gender, Gender::Female);
        assert_eq!(voice.region, "US");
        assert_eq!(voice.label, "Microsoft Zira (en-US)");
        assert_eq!(voice.handle, VoiceHandle::new("Microsoft Zira"));
    }

    #[test]
    fn region_falls_back_to_whole_tag() {
        assert_eq!(region_code("en-us"), "US");
        assert_eq!(region_code("ja"), "JA");
        assert_eq!(region_code("zh-Hant-TW"), "HANT");
        assert_eq!(region_code("en-"), "EN-");
    }

    #[test]
    fn groups_by_resolved_language_name() {
        let build = VoiceCatalogBuilder::new().build(&sample_voices());
        let groups = build.catalog.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].language, "English");
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[1].language, "French");

        let french: Vec<&str> = build
            .catalog
            .group_entries(&groups[1])
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(french, vec!["Amelie", "Google français"]);
    }

    #[test]
    fn unresolved_languages_group_under_raw_code() {
        struct NoNames;
        impl LanguageNameResolver for NoNames {
            fn display_name_for(&self, code: &str) -> String {
                code.to_string()
            }
        }

        let build = VoiceCatalogBuilder::new()
            .with_resolver(NoNames)
            .build(&[RawVoice::new("Voice A", "xx-YY")]);
        assert_eq!(build.catalog.groups()[0].language, "xx");
    }

    #[test]
    fn default_prefers_english_female() {
        let tables =
            ClassificationTables::from_json(r#"{"female": ["alice"], "male": ["bob"]}"#)
                .expect("valid tables");
        let builder = VoiceCatalogBuilder::new().with_tables(tables);
        assert_eq!(builder.tables().male, vec!["bob".to_string()]);

        let build = builder.build(&[
            RawVoice::new("Alice", "en-US"),
            RawVoice::new("Bob", "en-US"),
        ]);
        assert_eq!(build.default_selection, Some(VoiceHandle::new("Alice")));
    }

    #[test]
    fn default_falls_back_to_any_english_then_first() {
        let builder = VoiceCatalogBuilder::new();

        let english = builder.build(&[
            RawVoice::new("Amelie", "fr-FR"),
            RawVoice::new("Microsoft David", "en-US"),
        ]);
        assert_eq!(
            english.default_selection,
            Some(VoiceHandle::new("Microsoft David"))
        );

        let foreign = builder.build(&[
            RawVoice::new("Pablo", "es-ES"),
            RawVoice::new("Amelie", "fr-FR"),
        ]);
        assert_eq!(foreign.default_selection, Some(VoiceHandle::new("Pablo")));
    }

    #[test]
    fn empty_snapshot_builds_empty_catalog() {
        let build = VoiceCatalogBuilder::new().build(&[]);
        assert!(build.catalog.is_empty());
        assert!(build.catalog.groups().is_empty());
        assert_eq!(build.default_selection, None);
    }

    #[test]
    fn find_matches_exact_name_then_word_or_lang() {
        let build = VoiceCatalogBuilder::new().build(&sample_voices());
        let catalog = &build.catalog;

        assert_eq!(
            catalog.find("Microsoft David").map(|v| v.name.as_str()),
            Some("Microsoft David")
        );
        // "Microsoft Zira" sorts before "Microsoft David".
        assert_eq!(
            catalog.find("Microsoft Mark").map(|v| v.name.as_str()),
            Some("Microsoft Zira")
        );
        assert_eq!(
            catalog.find("fr-CA").map(|v| v.name.as_str()),
            Some("Amelie")
        );
        assert!(catalog.find("   ").is_none());
        assert!(catalog.find("Nobody").is_none());
    }

    #[test]
    fn find_takes_first_entry_matching_word_or_lang() {
        let build = VoiceCatalogBuilder::new().build(&[
            RawVoice::new("Amelie", "en-AU"),
            RawVoice::new("en-AU Karen", "en-US"),
        ]);

        // "Amelie" sorts first and matches by language only.
        assert_eq!(
            build.catalog.find("en-AU").map(|v| v.name.as_str()),
            Some("Amelie")
        );
        assert_eq!(
            build.catalog.find("en-AU Karen").map(|v| v.name.as_str()),
            Some("en-AU Karen")
        );
    }

    #[test]
    fn get_looks_up_by_handle() {
        let build = VoiceCatalogBuilder::new().build(&sample_voices());
        let default = build.default_selection.expect("default voice");

        let voice = build.catalog.get(&default).expect("default is in the catalog");
        assert_eq!(voice.label, "Google UK English Female (en-GB)");
        assert!(build.catalog.get(&VoiceHandle::new("Nobody")).is_none());
    }

    #[test]
    fn descriptors_serialize_gender_as_lowercase() {
        let voice = VoiceCatalogBuilder::new().describe(&RawVoice::new("Microsoft David", "en-US"));
        let json = serde_json::to_value(&voice).expect("serializable");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["handle"], "Microsoft David");
        assert_eq!(json["region"], "US");
    }

    #[test]
    fn raw_voices_deserialize_from_json() {
        let voices: Vec<RawVoice> =
            serde_json::from_str(r#"[{"name": "Microsoft Zira", "lang": "en-US"}]"#)
                .expect("valid snapshot");
        assert_eq!(voices, vec![RawVoice::new("Microsoft Zira", "en-US")]);
    }
}
