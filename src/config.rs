use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keycheckrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// Directory names never descended into while scanning sources.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    "__fixtures__",
    "fixtures",
    "__mocks__",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root", alias = "localesDir")]
    pub messages_root: String,
    #[serde(default = "default_reference_locale", alias = "primaryLocale")]
    pub reference_locale: String,
    /// Known locales. Empty means "every directory under `messagesRoot`".
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_messages_root() -> String {
    "./locales".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_namespaces() -> Vec<String> {
    [
        "common",
        "medical",
        "errors",
        "navigation",
        "notifications",
        "admin",
    ]
    .map(String::from)
    .to_vec()
}

fn default_namespace() -> String {
    "common".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            reference_locale: default_reference_locale(),
            locales: Vec::new(),
            namespaces: default_namespaces(),
            default_namespace: default_namespace(),
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid or the namespace
    /// vocabulary is unusable.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.namespaces.is_empty() {
            anyhow::bail!("'namespaces' must name at least one namespace");
        }

        if let Some(ns) = self
            .namespaces
            .iter()
            .find(|ns| ns.is_empty() || ns.contains(':'))
        {
            anyhow::bail!("Invalid namespace name in 'namespaces': \"{}\"", ns);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
