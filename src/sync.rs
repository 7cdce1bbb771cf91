//! Locale synchronization: regenerate every target bundle from the default one.
//!
//! For each target language (in configured order), every regular file of the
//! default-language directory is read, each of its values is translated, and
//! the result is written under the same name in the target directory.
//!
//! Failure policy:
//! - a single value that fails to translate keeps its source text and the run
//!   goes on;
//! - any filesystem error or malformed source file aborts the run. Files
//!   already written stay in place.

use crate::error::SyncError;
use crate::i18n::{Language, SyncMetrics, SyncReport, TranslationValidator};
use crate::resource::{self, EntryValue, ResourceMap};
use crate::translator::Translator;
use anyhow::{bail, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Locale layout and languages for one run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    root: PathBuf,
    default_language: Language,
    target_languages: Vec<Language>,
}

impl SyncConfig {
    /// Validate and build a configuration.
    ///
    /// Targets must be non-empty, unique, and must not include the default
    /// language (its directory is the read-only source).
    pub fn new(
        root: impl Into<PathBuf>,
        default_language: Language,
        target_languages: Vec<Language>,
    ) -> Result<Self> {
        if target_languages.is_empty() {
            bail!("At least one target language is required");
        }

        // Language equality ignores case, matching case-insensitive filesystems
        let mut seen = HashSet::new();
        for language in &target_languages {
            if language == &default_language {
                bail!(
                    "Target languages must not include the default language '{}'",
                    default_language
                );
            }
            if !seen.insert(language) {
                bail!("Duplicate target language '{}'", language);
            }
        }

        Ok(Self {
            root: root.into(),
            default_language,
            target_languages,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_language(&self) -> &Language {
        &self.default_language
    }

    pub fn target_languages(&self) -> &[Language] {
        &self.target_languages
    }

    /// Directory of a locale bundle.
    pub fn bundle_dir(&self, language: &Language) -> PathBuf {
        self.root.join(language.code())
    }

    fn source_dir(&self) -> PathBuf {
        self.bundle_dir(&self.default_language)
    }
}

/// Regenerates target locale bundles through a [`Translator`].
#[derive(Debug)]
pub struct LocaleSynchronizer<T> {
    config: SyncConfig,
    translator: T,
}

impl<T: Translator> LocaleSynchronizer<T> {
    pub fn new(config: SyncConfig, translator: T) -> Self {
        Self { config, translator }
    }

    /// Synchronize all target locales.
    ///
    /// Every run recomputes every target file; nothing from earlier runs is
    /// reused.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let metrics = SyncMetrics::new();

        info!(
            "Synchronizing {} target locale(s) from '{}' in {:?}",
            self.config.target_languages.len(),
            self.config.default_language,
            self.config.root
        );

        for target in &self.config.target_languages {
            self.sync_language(target, &metrics).await?;
        }

        let report = metrics.report();
        info!("Synchronization finished: {}", report);
        Ok(report)
    }

    /// Regenerate every resource file of one target language.
    async fn sync_language(
        &self,
        target: &Language,
        metrics: &SyncMetrics,
    ) -> Result<(), SyncError> {
        let source_dir = self.config.source_dir();
        let target_dir = self.config.bundle_dir(target);

        info!("Locale {} ({})", target, target.native_name());

        let entries = list_source_entries(&source_dir).await?;

        tokio::fs::create_dir_all(&target_dir)
            .await
            .map_err(|source| SyncError::CreateDir {
                path: target_dir.clone(),
                source,
            })?;

        for entry in entries {
            match entry {
                SourceEntry::Directory(path) => {
                    info!("Skipping directory {:?}", path);
                    metrics.record_directory_skipped();
                }
                SourceEntry::Other(path) => {
                    debug!("Skipping {:?}: not a regular file", path);
                }
                SourceEntry::File { path, name } => {
                    info!("Translating {} to {}...", name, target);

                    let source = resource::read_resource(&path).await?;
                    let translated = self
                        .translate_resource(&source, target, &name, metrics)
                        .await;

                    let target_path = target_dir.join(&name);
                    resource::write_resource(&target_path, &translated).await?;
                    metrics.record_file_written();
                }
            }
        }

        Ok(())
    }

    /// Translate every value of a resource, keeping keys and their order.
    ///
    /// Never fails: a value that cannot be translated keeps its source text.
    pub async fn translate_resource(
        &self,
        source: &ResourceMap,
        target: &Language,
        file_name: &str,
        metrics: &SyncMetrics,
    ) -> ResourceMap {
        let mut translated = ResourceMap::new();

        for (key, value) in source {
            let new_value = match EntryValue::classify(value) {
                EntryValue::Text(text) | EntryValue::Message(text) => {
                    let text = self
                        .translate_text(key, text, target, file_name, metrics)
                        .await;
                    resource::replace_text(value, text)
                }
                EntryValue::Opaque => {
                    warn!(
                        "Key '{}' in {} is not a string; copied to {} unchanged",
                        key, file_name, target
                    );
                    metrics.record_passed_through();
                    value.clone()
                }
            };

            translated.insert(key.clone(), new_value);
        }

        translated
    }

    async fn translate_text(
        &self,
        key: &str,
        text: &str,
        target: &Language,
        file_name: &str,
        metrics: &SyncMetrics,
    ) -> String {
        if text.trim().is_empty() {
            metrics.record_passed_through();
            return text.to_string();
        }

        match self.translator.translate(text, target).await {
            Ok(translated) => {
                let validation = TranslationValidator::validate(text, &translated);
                if !validation.is_clean() {
                    warn!(
                        "Translation of key '{}' in {} to {} may be damaged: {:?}",
                        key, file_name, target, validation.warnings
                    );
                    metrics.record_validation_warning();
                }
                metrics.record_translated();
                translated
            }
            Err(e) => {
                warn!(
                    "Error translating key '{}' in {} to {}: {}. Keeping original text",
                    key, file_name, target, e
                );
                metrics.record_fallback();
                text.to_string()
            }
        }
    }
}

/// One entry found directly inside the source bundle.
#[derive(Debug)]
enum SourceEntry {
    File { path: PathBuf, name: String },
    Directory(PathBuf),
    Other(PathBuf),
}

/// List the source bundle without recursing, sorted by file name.
///
/// Symlinks are followed, so a link to a file is processed like a file.
async fn list_source_entries(dir: &Path) -> Result<Vec<SourceEntry>, SyncError> {
    let read_dir_error = |source| SyncError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut reader = tokio::fs::read_dir(dir).await.map_err(read_dir_error)?;
    let mut paths = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(read_dir_error)? {
        paths.push(entry.path());
    }
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|source| SyncError::ReadDir {
                path: path.clone(),
                source,
            })?;

        let entry = if metadata.is_dir() {
            SourceEntry::Directory(path)
        } else if metadata.is_file() {
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => SourceEntry::File {
                    name: name.to_string(),
                    path,
                },
                None => {
                    warn!("Skipping {:?}: file name is not valid UTF-8", path);
                    SourceEntry::Other(path)
                }
            }
        } else {
            SourceEntry::Other(path)
        };
        entries.push(entry);
    }

    Ok(entries)
}
