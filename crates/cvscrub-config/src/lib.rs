use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project config file name, searched for from the current directory upwards
pub const PROJECT_FILE: &str = "cvscrub.toml";

/// Configuration for cvscrub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Salt for placeholder hashes. A random one is used per run when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,

    /// Vendor and product names protected from scrubbing
    #[serde(default = "default_brands")]
    pub brands: Vec<String>,

    /// Extra terms always redacted (villages, small employers, schools...)
    #[serde(default)]
    pub local_terms: Vec<String>,

    /// Street types that end an address
    #[serde(default = "default_street_types")]
    pub address_suffixes: Vec<String>,

    #[serde(default)]
    pub detectors: DetectorsConfig,

    #[serde(default)]
    pub entities: EntitiesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorsConfig {
    #[serde(default = "enabled")]
    pub email: bool,

    #[serde(default = "enabled")]
    pub url: bool,

    #[serde(default = "enabled")]
    pub phone: bool,

    #[serde(default = "enabled")]
    pub postcode: bool,

    #[serde(default = "enabled")]
    pub address: bool,

    #[serde(default = "enabled")]
    pub entities: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitiesConfig {
    #[serde(default = "enabled")]
    pub names: bool,

    #[serde(default = "enabled")]
    pub organizations: bool,

    #[serde(default = "enabled")]
    pub locations: bool,

    /// Added to the built-in first-name gazetteer
    #[serde(default)]
    pub first_names: Vec<String>,

    /// Added to the built-in place gazetteer
    #[serde(default)]
    pub places: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name pattern used when scrubbing a directory
    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub recursive: bool,

    /// Always write a mapping file next to each output
    #[serde(default)]
    pub mapping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            salt: None,
            brands: default_brands(),
            local_terms: Vec::new(),
            address_suffixes: default_street_types(),
            detectors: DetectorsConfig::default(),
            entities: EntitiesConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DetectorsConfig {
    fn default() -> Self {
        Self {
            email: true,
            url: true,
            phone: true,
            postcode: true,
            address: true,
            entities: true,
        }
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            names: true,
            organizations: true,
            locations: true,
            first_names: Vec::new(),
            places: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            recursive: false,
            mapping: false,
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_pattern() -> String {
    "*.txt".to_string()
}

fn default_brands() -> Vec<String> {
    cvscrub_core::DEFAULT_BRANDS
        .iter()
        .map(|b| b.to_string())
        .collect()
}

fn default_street_types() -> Vec<String> {
    cvscrub_detectors::DEFAULT_STREET_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load config from, in order: an explicit path, `cvscrub.toml` in the
    /// current directory or a parent, the user config dir. Falls back to
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let current = std::env::current_dir()?;
        if let Some(path) = Self::find_project_file_from(&current) {
            return Self::from_path(&path);
        }

        let path = Self::config_path();
        if path.exists() {
            return Self::from_path(&path);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Load config from a specific file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Find cvscrub.toml by walking up from given directory
    pub fn find_project_file_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Get user config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "cvscrub", "cvscrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.cvscrub/config.toml")
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Parse a term list: one term per line, `#` starts a comment
pub fn parse_term_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Read a term list file
pub fn load_term_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read term list {}", path.display()))?;
    Ok(parse_term_list(&content))
}
