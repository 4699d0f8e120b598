//! Turns raw user selections into an immutable [`ProjectSpec`].

use crate::error::{KickstackError, Result};
use crate::external::Prompter;
use crate::types::{FeatureFlags, ProjectSpec, Variant};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// npm refuses package names longer than this.
pub const MAX_NAME_LEN: usize = 214;

/// Raw, unvalidated input gathered from the command line and prompts.
#[derive(Debug, Clone)]
pub struct RawSelections {
    pub name: String,
    pub variant_label: String,
    pub routing: bool,
}

static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
static DASH_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn disallowed_re() -> &'static Regex {
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^a-z0-9._~-]+").unwrap())
}

fn dash_run_re() -> &'static Regex {
    DASH_RUN_RE.get_or_init(|| Regex::new(r"-{2,}").unwrap())
}

/// Lowercase the name and collapse every run of disallowed characters to `-`.
/// Leading and trailing `-`, `.` and `_` are stripped since npm rejects them.
pub fn sanitize_name(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let replaced = disallowed_re().replace_all(&lower, "-");
    let collapsed = dash_run_re().replace_all(&replaced, "-");
    collapsed
        .trim_matches(|c| c == '-' || c == '.' || c == '_')
        .to_string()
}

pub fn validate_name(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(KickstackError::UserInput(
            "please provide a project name".to_string(),
        ));
    }
    let name = sanitize_name(raw);
    if name.is_empty() {
        return Err(KickstackError::UserInput(format!(
            "invalid project name '{raw}': no characters usable in a package name"
        )));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(KickstackError::UserInput(format!(
            "invalid project name: longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

// ---------------------------------------------------------------------------
// ProjectTarget
// ---------------------------------------------------------------------------

/// A validated name plus a target directory that did not exist when checked.
/// The check is not repeated later in the run.
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    name: String,
    directory: PathBuf,
}

impl ProjectTarget {
    pub fn new(raw_name: &str, base_dir: &Path) -> Result<Self> {
        let name = validate_name(raw_name)?;
        let directory = base_dir.join(&name);
        if std::fs::symlink_metadata(&directory).is_ok() {
            return Err(KickstackError::Precondition(directory));
        }
        tracing::debug!(name = %name, dir = %directory.display(), "project target resolved");
        Ok(Self { name, directory })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn with_flags(self, flags: FeatureFlags) -> ProjectSpec {
        ProjectSpec::new(self.name, self.directory, flags)
    }
}

/// Resolve raw selections in one step.
pub fn resolve(raw: &RawSelections, base_dir: &Path) -> Result<ProjectSpec> {
    let target = ProjectTarget::new(&raw.name, base_dir)?;
    Ok(target.with_flags(FeatureFlags::from_label(&raw.variant_label, raw.routing)))
}

// ---------------------------------------------------------------------------
// Interactive selection
// ---------------------------------------------------------------------------

pub const VARIANT_PROMPT: &str = "Select a project variant:";
pub const ROUTER_PROMPT: &str = "Include React Router (data router)?";
pub const ROUTER_CHOICES: &[&str] = &["Yes - add React Router (data router)", "No"];

pub fn prompt_variant(prompter: &dyn Prompter) -> Result<Variant> {
    let labels: Vec<&str> = Variant::all().iter().map(|v| v.label()).collect();
    let index = prompter.select(VARIANT_PROMPT, &labels, 0)?;
    Variant::all()
        .get(index)
        .copied()
        .ok_or_else(|| KickstackError::UserInput(format!("no variant at index {index}")))
}

pub fn prompt_routing(prompter: &dyn Prompter) -> Result<bool> {
    let index = prompter.select(ROUTER_PROMPT, ROUTER_CHOICES, 1)?;
    Ok(index == 0)
}
