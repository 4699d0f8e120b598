use crate::error::{KickstackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PackageManager
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
}

impl PackageManager {
    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

// ---------------------------------------------------------------------------
// BuildConfigMode
// ---------------------------------------------------------------------------

/// How the bundler config is produced: retrofit the upstream file, or
/// replace it with the canonical template before patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BuildConfigMode {
    #[default]
    Patch,
    Overwrite,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default = "default_vite_version")]
    pub vite_version: String,
    #[serde(default)]
    pub rolldown: bool,
    #[serde(default)]
    pub build_config: BuildConfigMode,
    #[serde(default = "default_true")]
    pub remove_demo_assets: bool,
    /// Extra demo markers on top of the built-in list.
    #[serde(default)]
    pub demo_markers: Vec<String>,
}

fn default_vite_version() -> String {
    "latest".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::default(),
            vite_version: default_vite_version(),
            rolldown: false,
            build_config: BuildConfigMode::default(),
            remove_demo_assets: true,
            demo_markers: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KickstackError::Config(format!(
                "{} does not exist",
                path.display()
            )));
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let version = self.vite_version.trim();
        if version.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "vite_version must not be empty".to_string(),
            });
        } else if version.chars().any(char::is_whitespace) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("vite_version '{version}' contains whitespace"),
            });
        }

        for marker in &self.demo_markers {
            if marker.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: "empty entry in demo_markers is ignored".to_string(),
                });
            }
        }

        warnings
    }

    /// Non-empty extra demo markers.
    pub fn extra_demo_markers(&self) -> Vec<String> {
        self.demo_markers
            .iter()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .collect()
    }
}
