use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use treefill::TreeShape;

use crate::ui;

/// Base name of the config file looked up in the working directory
pub const CONFIG_NAME: &str = "imgforest";

/// Config file name used by earlier versions of the tool, read as a fallback
pub const LEGACY_CONFIG_FILE: &str = "config.yml";

// ============================================================================
// Config Format
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// File extensions probed when looking for a config, in preference order
    const PROBE_ORDER: [(&'static str, Self); 4] = [
        ("toml", Self::Toml),
        ("json", Self::Json),
        ("yml", Self::Yaml),
        ("yaml", Self::Yaml),
    ];

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Find `<name>.{toml,json,yml,yaml}` in `dir`, in that order, falling back
/// to a legacy `config.yml`
pub fn find_config_file(dir: &Path, name: &str) -> Option<(PathBuf, ConfigFormat)> {
    ConfigFormat::PROBE_ORDER
        .into_iter()
        .map(|(ext, format)| (dir.join(format!("{name}.{ext}")), format))
        .chain(std::iter::once((dir.join(LEGACY_CONFIG_FILE), ConfigFormat::Yaml)))
        .find(|(path, _)| path.is_file())
}

// ============================================================================
// Generator Config
// ============================================================================

/// Settings for one generation run. Every key is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Upper bound of the random child count per directory
    pub max_leaf_per_branch: u32,
    /// Deepest level that still receives children
    pub max_branch_depth: u32,
    pub root_directory: String,
    pub src_image_path: String,
    /// Byte budget; an integer or a size string such as "10GB"
    #[serde(deserialize_with = "deserialize_size")]
    pub target_bytes: u64,
    pub minimum_images_per_directory: usize,
    /// Accepted for compatibility, never enforced
    pub max_path_length: usize,
    pub max_directories: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Bytes(u64),
    Text(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Bytes(n) => Ok(n),
        SizeValue::Text(s) => ui::parse_size(&s).map_err(serde::de::Error::custom),
    }
}

impl GeneratorConfig {
    /// Load a config file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path).with_context(|| {
            format!(
                "Unsupported config format: {} (expected .toml, .json or .yml)",
                path.display()
            )
        })?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;

        let config = Self::parse(&content, format)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, or the default config file from the working directory
    pub fn resolve(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().context("Could not determine current directory")?;
                find_config_file(&cwd, CONFIG_NAME)
                    .map(|(p, _)| p)
                    .with_context(|| {
                        format!(
                            "No config found ({0}.toml, {0}.json, {0}.yml or {1} in {2})",
                            CONFIG_NAME,
                            LEGACY_CONFIG_FILE,
                            cwd.display()
                        )
                    })?
            }
        };
        Ok((Self::load(&path)?, path))
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => toml::from_str(content).context("Invalid TOML format"),
            ConfigFormat::Json => serde_json::from_str(content).context("Invalid JSON format"),
            ConfigFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML format"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_leaf_per_branch == 0 {
            anyhow::bail!("max_leaf_per_branch must be at least 1");
        }
        if self.max_directories == 0 {
            anyhow::bail!("max_directories must be at least 1");
        }
        Ok(())
    }

    /// Get expanded root directory path
    pub fn root_path(&self) -> PathBuf {
        expand(&self.root_directory)
    }

    /// Get expanded source image path
    pub fn source_path(&self) -> PathBuf {
        expand(&self.src_image_path)
    }

    pub fn shape(&self) -> TreeShape {
        TreeShape {
            max_depth: self.max_branch_depth,
            max_children_per_node: self.max_leaf_per_branch,
            max_directories: self.max_directories,
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
