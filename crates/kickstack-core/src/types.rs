use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// LanguageVariant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageVariant {
    Js,
    Ts,
}

impl LanguageVariant {
    /// Extension of JSX-bearing source files.
    pub fn jsx_ext(self) -> &'static str {
        match self {
            LanguageVariant::Js => "jsx",
            LanguageVariant::Ts => "tsx",
        }
    }

    /// Extension of plain script files such as the build config.
    pub fn script_ext(self) -> &'static str {
        match self {
            LanguageVariant::Js => "js",
            LanguageVariant::Ts => "ts",
        }
    }

    /// Name of the upstream generator template.
    pub fn upstream_template(self) -> &'static str {
        match self {
            LanguageVariant::Js => "react",
            LanguageVariant::Ts => "react-ts",
        }
    }
}

// ---------------------------------------------------------------------------
// StylingSystem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylingSystem {
    None,
    Tailwind,
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// The four language/style choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    React,
    ReactTailwind,
    ReactTs,
    ReactTsTailwind,
}

impl Variant {
    pub fn all() -> &'static [Variant] {
        &[
            Variant::React,
            Variant::ReactTailwind,
            Variant::ReactTs,
            Variant::ReactTsTailwind,
        ]
    }

    /// Human-facing label shown in the selection prompt.
    pub fn label(self) -> &'static str {
        match self {
            Variant::React => "React (JavaScript)",
            Variant::ReactTailwind => "React + Tailwind (JavaScript)",
            Variant::ReactTs => "React + TypeScript",
            Variant::ReactTsTailwind => "React + TypeScript + Tailwind",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::React => "react",
            Variant::ReactTailwind => "react-tailwind",
            Variant::ReactTs => "react-ts",
            Variant::ReactTsTailwind => "react-ts-tailwind",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Variant::all().iter().map(|v| v.as_str()).collect();
                format!("unknown variant '{s}', expected one of: {}", names.join(", "))
            })
    }
}

// ---------------------------------------------------------------------------
// FeatureFlags
// ---------------------------------------------------------------------------

/// The resolved feature matrix. Every downstream component is a pure
/// function of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub language: LanguageVariant,
    pub styling: StylingSystem,
    pub routing: bool,
}

impl FeatureFlags {
    pub fn new(language: LanguageVariant, styling: StylingSystem, routing: bool) -> Self {
        Self {
            language,
            styling,
            routing,
        }
    }

    /// Decompose a variant label into the language and styling axes by
    /// substring membership. Routing is collected separately.
    pub fn from_label(label: &str, routing: bool) -> Self {
        let language = if label.contains("TypeScript") {
            LanguageVariant::Ts
        } else {
            LanguageVariant::Js
        };
        let styling = if label.contains("Tailwind") {
            StylingSystem::Tailwind
        } else {
            StylingSystem::None
        };
        Self::new(language, styling, routing)
    }

    pub fn from_variant(variant: Variant, routing: bool) -> Self {
        Self::from_label(variant.label(), routing)
    }

    pub fn is_ts(&self) -> bool {
        self.language == LanguageVariant::Ts
    }

    pub fn is_tailwind(&self) -> bool {
        self.styling == StylingSystem::Tailwind
    }

    /// All eight combinations of the three axes.
    pub fn all() -> Vec<FeatureFlags> {
        let mut out = Vec::with_capacity(8);
        for language in [LanguageVariant::Js, LanguageVariant::Ts] {
            for styling in [StylingSystem::None, StylingSystem::Tailwind] {
                for routing in [false, true] {
                    out.push(FeatureFlags::new(language, styling, routing));
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// ProjectSpec
// ---------------------------------------------------------------------------

/// A validated project: sanitized package name, target directory and flags.
/// Only the resolver constructs one, so holding a `ProjectSpec` means the
/// name was checked and the directory did not exist at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    name: String,
    directory: PathBuf,
    flags: FeatureFlags,
}

impl ProjectSpec {
    pub(crate) fn new(name: String, directory: PathBuf, flags: FeatureFlags) -> Self {
        Self {
            name,
            directory,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    NameValidated,
    FlagsResolved,
    Scaffolded,
    Cleaned,
    Patched,
    Validated,
    DependenciesInstalled,
    Done,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Init,
            Stage::NameValidated,
            Stage::FlagsResolved,
            Stage::Scaffolded,
            Stage::Cleaned,
            Stage::Patched,
            Stage::Validated,
            Stage::DependenciesInstalled,
            Stage::Done,
        ]
    }

    pub fn next(self) -> Option<Stage> {
        Stage::all().get(self as usize + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::NameValidated => "name_validated",
            Stage::FlagsResolved => "flags_resolved",
            Stage::Scaffolded => "scaffolded",
            Stage::Cleaned => "cleaned",
            Stage::Patched => "patched",
            Stage::Validated => "validated",
            Stage::DependenciesInstalled => "dependencies_installed",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
