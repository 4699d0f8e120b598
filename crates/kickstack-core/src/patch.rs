//! Anchored, idempotent text patches for files the upstream generator owns.
//!
//! A [`PatchRule`] is a list of [`AnchoredEdit`]s applied to an in-memory copy
//! of one file. Every edit is checked independently: its guard is consulted
//! first (already satisfied means no-op), then its anchor is located (absent
//! means the edit is reported missing and the buffer is left alone). The file
//! is rewritten atomically once, and only if the buffer changed.

use crate::error::Result;
use crate::io;
use crate::paths;
use crate::template::TAILWIND_DIRECTIVE;
use crate::types::{FeatureFlags, ProjectSpec};
use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const TITLE_PATCH: &str = "title";
pub const FAVICON_PATCH: &str = "favicon";
pub const PLUGIN_INJECTION_PATCH: &str = "tailwind-plugin";

// ---------------------------------------------------------------------------
// Guards and edits
// ---------------------------------------------------------------------------

/// Predicate that, when it holds, makes an edit a no-op.
#[derive(Debug, Clone)]
pub enum Guard {
    Contains(String),
    Lacks(String),
    Matches(Regex),
    /// The anchor's first capture group already equals the value.
    CaptureEquals(String),
}

#[derive(Debug, Clone)]
pub enum Edit {
    /// Replace the anchor's first capture group.
    ReplaceCapture(String),
    /// Replace the whole anchor match.
    ReplaceMatch(String),
    /// Insert directly after the anchor match.
    InsertAfter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    Applied,
    AlreadySatisfied,
    AnchorMissing,
}

#[derive(Debug, Clone)]
pub struct AnchoredEdit {
    pub label: &'static str,
    anchor: Regex,
    guard: Guard,
    edit: Edit,
}

impl AnchoredEdit {
    pub fn new(label: &'static str, anchor: Regex, guard: Guard, edit: Edit) -> Self {
        Self {
            label,
            anchor,
            guard,
            edit,
        }
    }

    fn guard_holds(&self, text: &str) -> bool {
        match &self.guard {
            Guard::Contains(s) => text.contains(s.as_str()),
            Guard::Lacks(s) => !text.contains(s.as_str()),
            Guard::Matches(re) => re.is_match(text),
            Guard::CaptureEquals(value) => self
                .anchor
                .captures(text)
                .and_then(|c| c.get(1))
                .is_some_and(|m| m.as_str() == value),
        }
    }

    fn target_range(&self, text: &str) -> Option<(Range<usize>, String)> {
        let caps = self.anchor.captures(text)?;
        let whole = caps.get(0)?;
        match &self.edit {
            Edit::ReplaceCapture(s) => caps.get(1).map(|g| (g.range(), s.clone())),
            Edit::ReplaceMatch(s) => Some((whole.range(), s.clone())),
            Edit::InsertAfter(s) => Some((whole.end()..whole.end(), s.clone())),
        }
    }

    /// Apply to `text` in place. The buffer is only touched on `Applied`.
    pub fn apply(&self, text: &mut String) -> EditOutcome {
        if self.guard_holds(text) {
            return EditOutcome::AlreadySatisfied;
        }
        let Some((range, replacement)) = self.target_range(text) else {
            return EditOutcome::AnchorMissing;
        };
        text.replace_range(range, &replacement);
        EditOutcome::Applied
    }
}

// ---------------------------------------------------------------------------
// PatchRule / PatchReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    Applied,
    Unchanged,
    Incomplete,
    NotApplicable,
}

impl PatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatchStatus::Applied => "applied",
            PatchStatus::Unchanged => "unchanged",
            PatchStatus::Incomplete => "incomplete",
            PatchStatus::NotApplicable => "not applicable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditReport {
    pub label: &'static str,
    pub outcome: EditOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub rule: String,
    pub target: PathBuf,
    pub required: bool,
    pub status: PatchStatus,
    pub edits: Vec<EditReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PatchReport {
    fn without_edits(rule: &PatchRule, status: PatchStatus, reason: Option<String>) -> Self {
        Self {
            rule: rule.name.to_string(),
            target: PathBuf::from(&rule.target),
            required: rule.required,
            status,
            edits: Vec::new(),
            reason,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.status == PatchStatus::Incomplete
    }
}

#[derive(Debug, Clone)]
pub struct PatchRule {
    pub name: &'static str,
    /// Project-relative path of the file to patch.
    pub target: String,
    /// Whether an incomplete outcome must fail validation.
    pub required: bool,
    /// Whether the rule applies to the active flags at all.
    pub applicable: bool,
    precondition: Option<(Regex, &'static str)>,
    edits: Vec<AnchoredEdit>,
}

impl PatchRule {
    pub fn new(name: &'static str, target: impl Into<String>, edits: Vec<AnchoredEdit>) -> Self {
        Self {
            name,
            target: target.into(),
            required: false,
            applicable: true,
            precondition: None,
            edits,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn applicable(mut self, applicable: bool) -> Self {
        self.applicable = applicable;
        self
    }

    /// A pattern that must match before any edit runs. When it is absent the
    /// rule reports incomplete with `reason` and performs no mutation.
    pub fn precondition(mut self, pattern: Regex, reason: &'static str) -> Self {
        self.precondition = Some((pattern, reason));
        self
    }

    /// Pure transform of file contents.
    pub fn apply_to_str(&self, input: &str) -> (String, PatchReport) {
        if !self.applicable {
            let report = PatchReport::without_edits(self, PatchStatus::NotApplicable, None);
            return (input.to_string(), report);
        }
        if let Some((pattern, reason)) = &self.precondition {
            if !pattern.is_match(input) {
                let report = PatchReport::without_edits(
                    self,
                    PatchStatus::Incomplete,
                    Some((*reason).to_string()),
                );
                return (input.to_string(), report);
            }
        }

        let mut buffer = input.to_string();
        let edits: Vec<EditReport> = self
            .edits
            .iter()
            .map(|edit| EditReport {
                label: edit.label,
                outcome: edit.apply(&mut buffer),
            })
            .collect();

        let missing: Vec<&str> = edits
            .iter()
            .filter(|e| e.outcome == EditOutcome::AnchorMissing)
            .map(|e| e.label)
            .collect();
        let (status, reason) = if !missing.is_empty() {
            (
                PatchStatus::Incomplete,
                Some(format!("anchor not found: {}", missing.join(", "))),
            )
        } else if edits.iter().any(|e| e.outcome == EditOutcome::Applied) {
            (PatchStatus::Applied, None)
        } else {
            (PatchStatus::Unchanged, None)
        };

        let report = PatchReport {
            rule: self.name.to_string(),
            target: PathBuf::from(&self.target),
            required: self.required,
            status,
            edits,
            reason,
        };
        (buffer, report)
    }

    /// Patch the target file under `root`, writing only when contents change.
    pub fn apply(&self, root: &Path) -> Result<PatchReport> {
        if !self.applicable {
            return Ok(PatchReport::without_edits(
                self,
                PatchStatus::NotApplicable,
                None,
            ));
        }
        let path = paths::resolve(root, &self.target);
        let Some(original) = io::read_if_exists(&path)? else {
            return Ok(PatchReport::without_edits(
                self,
                PatchStatus::Incomplete,
                Some("file not found".to_string()),
            ));
        };
        let (updated, report) = self.apply_to_str(&original);
        if updated != original {
            io::atomic_write(&path, updated.as_bytes())?;
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

static TITLE_RE: OnceLock<Regex> = OnceLock::new();
static FAVICON_RE: OnceLock<Regex> = OnceLock::new();
static REACT_IMPORT_LINE_RE: OnceLock<Regex> = OnceLock::new();
static REACT_ONLY_PLUGINS_RE: OnceLock<Regex> = OnceLock::new();
static TAILWIND_PLUGIN_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?is)<title>(.*?)</title>").unwrap())
}

fn favicon_re() -> &'static Regex {
    FAVICON_RE.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*<link[^>]*href="/vite\.svg"[^>]*>[ \t]*\r?\n"#).unwrap()
    })
}

fn react_import_line_re() -> &'static Regex {
    REACT_IMPORT_LINE_RE.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*import\s+react\s+from\s+['"]@vitejs/plugin-react['"][^\n]*\n"#)
            .unwrap()
    })
}

fn react_only_plugins_re() -> &'static Regex {
    REACT_ONLY_PLUGINS_RE
        .get_or_init(|| Regex::new(r"plugins:\s*\[\s*react\(\)\s*,?\s*\]").unwrap())
}

fn tailwind_plugin_re() -> &'static Regex {
    TAILWIND_PLUGIN_RE
        .get_or_init(|| Regex::new(r"plugins:\s*\[[^\]]*\btailwindcss\(\)").unwrap())
}

/// Set the text of the first `<title>` element in `index.html`.
pub fn title_patch(title: &str) -> PatchRule {
    PatchRule::new(
        TITLE_PATCH,
        paths::INDEX_HTML,
        vec![AnchoredEdit::new(
            "title element",
            title_re().clone(),
            Guard::CaptureEquals(title.to_string()),
            Edit::ReplaceCapture(title.to_string()),
        )],
    )
    .required(true)
}

/// Drop the favicon link to the removed `/vite.svg` asset.
pub fn favicon_patch() -> PatchRule {
    PatchRule::new(
        FAVICON_PATCH,
        paths::INDEX_HTML,
        vec![AnchoredEdit::new(
            "favicon link",
            favicon_re().clone(),
            Guard::Lacks("/vite.svg".to_string()),
            Edit::ReplaceMatch(String::new()),
        )],
    )
}

/// Wire the Tailwind bundler plugin into the build config's plugin list.
///
/// The precondition and the import edit share one anchor so the plugin list
/// is never touched unless the import can be inserted too.
pub fn plugin_injection(flags: &FeatureFlags) -> PatchRule {
    PatchRule::new(
        PLUGIN_INJECTION_PATCH,
        paths::build_config(flags),
        vec![
            AnchoredEdit::new(
                "styling plugin import",
                react_import_line_re().clone(),
                Guard::Contains("@tailwindcss/vite".to_string()),
                Edit::InsertAfter("import tailwindcss from '@tailwindcss/vite'\n".to_string()),
            ),
            AnchoredEdit::new(
                "plugin list",
                react_only_plugins_re().clone(),
                Guard::Matches(tailwind_plugin_re().clone()),
                Edit::ReplaceMatch("plugins: [react(), tailwindcss()]".to_string()),
            ),
        ],
    )
    .precondition(react_import_line_re().clone(), "framework plugin import not found")
    .required(flags.is_tailwind())
    .applicable(flags.is_tailwind())
}

/// Every rule for the project, applicable or not, in application order.
pub fn rules_for(spec: &ProjectSpec) -> Vec<PatchRule> {
    let flags = spec.flags();
    vec![
        title_patch(spec.name()),
        favicon_patch(),
        plugin_injection(&flags),
    ]
}

pub fn apply_all(root: &Path, rules: &[PatchRule]) -> Result<Vec<PatchReport>> {
    let mut reports = Vec::with_capacity(rules.len());
    for rule in rules {
        let report = rule.apply(root)?;
        if report.is_incomplete() {
            tracing::warn!(
                rule = rule.name,
                target = %rule.target,
                required = rule.required,
                reason = report.reason.as_deref().unwrap_or(""),
                "patch incomplete"
            );
        } else {
            tracing::debug!(rule = rule.name, status = report.status.as_str(), "patch");
        }
        reports.push(report);
    }
    Ok(reports)
}

/// True when a global stylesheet carries the Tailwind import directive.
pub fn has_tailwind_directive(css: &str) -> bool {
    css.contains(TAILWIND_DIRECTIVE)
}
