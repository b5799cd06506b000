use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Build mode selected for a pipeline run.
///
/// Resolution order: CLI flag > `PACKLAB_MODE` env var > config file >
/// development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Parse a mode string as found in env vars or CLI flags.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub server: ServerConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BuildConfig {
    /// Mode used when neither the CLI flag nor PACKLAB_MODE is set.
    pub mode: Option<BuildMode>,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Files copied into the output dir unchanged.
    pub static_files: Vec<PathBuf>,
    /// Page entry script, relative to source_dir.
    pub main_entry: PathBuf,
    /// Secondary entry script, relative to source_dir.
    pub extra_entry: Option<PathBuf>,
    /// HTML shell template, relative to source_dir.
    pub html_template: PathBuf,
    /// Hex digits of the content hash embedded in output filenames.
    pub hash_len: usize,
    /// Rewrite lintable problems in place instead of only reporting them.
    pub lint_fix: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: None,
            source_dir: PathBuf::from("site/src"),
            output_dir: PathBuf::from("dist"),
            static_files: vec![PathBuf::from("site/favicon.svg")],
            main_entry: PathBuf::from("index.js"),
            extra_entry: Some(PathBuf::from("statistics.js")),
            html_template: PathBuf::from("index.html"),
            hash_len: 12,
            lint_fix: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 4200 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DemoConfig {
    pub post_title: String,
    pub post_image: String,
    /// Delay before the banner task resolves to its constant string.
    pub banner_delay_ms: u64,
    /// Delay before the placeholder element is rewritten with the post.
    pub post_delay_ms: u64,
    /// Id of the document node the UI tree is mounted into.
    pub mount_id: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            post_title: "Webpack Post Title".to_string(),
            post_image: "assets/images/icon.svg".to_string(),
            banner_delay_ms: 2000,
            post_delay_ms: 1000,
            mount_id: "root".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load the config file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the effective build mode. `cli_mode` wins, then the
    /// PACKLAB_MODE env var, then the config file, then development.
    pub fn resolve_mode(&self, cli_mode: Option<BuildMode>) -> BuildMode {
        if let Some(mode) = cli_mode {
            return mode;
        }
        if let Ok(raw) = std::env::var("PACKLAB_MODE") {
            if let Some(mode) = BuildMode::parse(&raw) {
                return mode;
            }
        }
        self.build.mode.unwrap_or(BuildMode::Development)
    }
}
