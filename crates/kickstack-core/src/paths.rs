use crate::types::FeatureFlags;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Fixed project-relative paths
// ---------------------------------------------------------------------------

pub const PACKAGE_JSON: &str = "package.json";
pub const INDEX_HTML: &str = "index.html";
pub const APP_CSS: &str = "src/App.css";
pub const INDEX_CSS: &str = "src/index.css";
pub const ESLINT_CONFIG: &str = "eslint.config.js";
pub const GITIGNORE: &str = ".gitignore";
pub const VSCODE_EXTENSIONS: &str = ".vscode/extensions.json";
pub const README_MD: &str = "README.md";

/// Upstream demo assets removed during cleanup.
pub const DEMO_ASSETS: &[&str] = &["src/assets", "public/vite.svg"];

// ---------------------------------------------------------------------------
// Flag-dependent paths
// ---------------------------------------------------------------------------

pub fn main_entry(flags: &FeatureFlags) -> String {
    format!("src/main.{}", flags.language.jsx_ext())
}

pub fn app_component(flags: &FeatureFlags) -> String {
    format!("src/App.{}", flags.language.jsx_ext())
}

pub fn build_config(flags: &FeatureFlags) -> String {
    format!("vite.config.{}", flags.language.script_ext())
}

/// Join a project-relative path onto the project root.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    root.join(relative)
}
