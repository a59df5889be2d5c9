use std::{
    collections::{BTreeMap, HashSet},
    path::{Component, Path, PathBuf},
};

use anyhow::{Result, bail};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        LocaleDictionary,
        file_scanner::{ScanResult, scan_files},
        parsers::json::{discover_locales, load_dictionary},
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// Per-run context shared by the checker and the scanner.
///
/// Built once at the start of a command and passed by reference; nothing
/// in the analysis reads configuration from anywhere else.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--reference-locale en`)
/// 2. `.keycheckrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Directory holding `<locale>/<namespace>.json`.
    pub messages_root: PathBuf,

    /// Known locales, sorted. Always contains the reference locale.
    pub locales: Vec<String>,

    pub verbose: bool,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - Messages directory doesn't exist
    /// - Reference locale is not one of the known locales
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            tracing::debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = config_result.config;

        if let Some(ref reference_locale) = common_args.reference_locale {
            config.reference_locale = reference_locale.clone();
        }

        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().to_string();
        }

        let messages_root = resolve_messages_root(&root_dir, &config.messages_root);

        let locales = if config.locales.is_empty() {
            discover_locales(&messages_root)?
        } else {
            if !messages_root.is_dir() {
                bail!(
                    "Messages directory '{}' does not exist.\n\
                     Hint: Check your {} 'messagesRoot' setting.",
                    messages_root.display(),
                    CONFIG_FILE_NAME
                );
            }
            let mut locales = config.locales.clone();
            locales.sort();
            locales.dedup();
            locales
        };

        if !locales.contains(&config.reference_locale) {
            bail!(
                "Reference locale '{}' not found in '{}' (available: {})",
                config.reference_locale,
                messages_root.display(),
                display_list(&locales)
            );
        }

        tracing::debug!(
            messages_root = %messages_root.display(),
            reference = %config.reference_locale,
            locales = ?locales,
            "initialized context"
        );

        Ok(Self {
            config,
            root_dir,
            messages_root,
            locales,
            verbose: common_args.verbose,
        })
    }

    pub fn reference_locale(&self) -> &str {
        &self.config.reference_locale
    }

    pub fn namespaces(&self) -> &[String] {
        &self.config.namespaces
    }

    /// Every known locale except the reference locale.
    pub fn target_locales(&self) -> Vec<&str> {
        self.locales
            .iter()
            .map(String::as_str)
            .filter(|l| *l != self.reference_locale())
            .collect()
    }

    /// Fail with the list of valid values if `locale` is not known.
    pub fn validate_locale(&self, locale: &str) -> Result<()> {
        if !self.locales.iter().any(|l| l == locale) {
            bail!(
                "Invalid locale '{}'. Valid locales: {}",
                locale,
                display_list(&self.locales)
            );
        }
        Ok(())
    }

    /// Fail with the list of valid values if `namespace` is not configured.
    pub fn validate_namespace(&self, namespace: &str) -> Result<()> {
        if !self.namespaces().iter().any(|n| n == namespace) {
            bail!(
                "Invalid namespace '{}'. Valid namespaces: {}",
                namespace,
                display_list(self.namespaces())
            );
        }
        Ok(())
    }

    /// Collect the source files to scan, sorted.
    pub fn source_files(&self) -> ScanResult {
        let result = scan_files(
            &self.root_dir,
            &self.config.includes,
            &self.config.ignores,
            self.config.ignore_test_files,
        );

        if result.skipped_count > 0 {
            tracing::warn!(
                count = result.skipped_count,
                "path(s) skipped due to access errors"
            );
        }
        result
    }

    pub fn load_index(&self, locale: &str) -> KeyIndex {
        KeyIndex::load(&self.messages_root, locale, self.namespaces())
    }
}

fn resolve_messages_root(root_dir: &Path, messages_root: &str) -> PathBuf {
    let p = Path::new(messages_root);
    if p.is_absolute() {
        return p.to_path_buf();
    }

    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

fn display_list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

/// Key set of one namespace.
#[derive(Debug, Default)]
struct NamespaceKeys {
    /// `None` when the dictionary file is absent or failed to parse.
    dictionary: Option<LocaleDictionary>,
    keys: HashSet<String>,
}

/// Flattened key sets of every configured namespace for one locale.
///
/// Built once per scan; lookups answer whether a (namespace, key) pair is
/// defined.
#[derive(Debug, Default)]
pub struct KeyIndex {
    pub locale: String,
    namespaces: BTreeMap<String, NamespaceKeys>,
    /// Dictionaries of this locale that could not be read or parsed.
    pub parse_errors: Vec<ParseErrorIssue>,
}

impl KeyIndex {
    /// Load every configured namespace of `locale`.
    ///
    /// Absent dictionaries leave their namespace without a key set. Malformed
    /// ones are recorded in `parse_errors` and are treated the same way.
    pub fn load(messages_root: &Path, locale: &str, namespaces: &[String]) -> Self {
        let mut index = KeyIndex {
            locale: locale.to_string(),
            ..Default::default()
        };

        for namespace in namespaces {
            let entry = match load_dictionary(messages_root, locale, namespace) {
                Ok(Some(dictionary)) => NamespaceKeys {
                    keys: dictionary.keys().into_iter().collect(),
                    dictionary: Some(dictionary),
                },
                Ok(None) => {
                    tracing::debug!(locale, namespace = %namespace, "dictionary not found");
                    NamespaceKeys::default()
                }
                Err(e) => {
                    tracing::warn!(locale, namespace = %namespace, error = %e, "cannot load dictionary");
                    index.parse_errors.push(ParseErrorIssue {
                        file_path: crate::core::parsers::json::dictionary_path(
                            messages_root,
                            locale,
                            namespace,
                        )
                        .to_string_lossy()
                        .to_string(),
                        error: format!("{:#}", e),
                        file_type: ParseErrorFileType::Message,
                    });
                    NamespaceKeys::default()
                }
            };
            index.namespaces.insert(namespace.clone(), entry);
        }

        index
    }

    /// Whether `key` is defined in `namespace`.
    ///
    /// Returns `None` when the namespace has no key set to look in: it is
    /// not part of the vocabulary, or its dictionary is absent or malformed.
    pub fn contains(&self, namespace: &str, key: &str) -> Option<bool> {
        self.namespaces
            .get(namespace)
            .filter(|entry| entry.dictionary.is_some())
            .map(|entry| entry.keys.contains(key))
    }

    /// Loaded dictionaries, sorted by namespace.
    pub fn dictionaries(&self) -> impl Iterator<Item = &LocaleDictionary> {
        self.namespaces
            .values()
            .filter_map(|entry| entry.dictionary.as_ref())
    }

    /// Total number of keys across all namespaces.
    pub fn key_count(&self) -> usize {
        self.namespaces.values().map(|entry| entry.keys.len()).sum()
    }
}
