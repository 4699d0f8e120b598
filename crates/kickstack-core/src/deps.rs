use crate::error::Result;
use crate::types::FeatureFlags;
use serde::Serialize;
use std::collections::BTreeSet;

pub const FRAMEWORK_RUNTIME: &str = "react";
pub const DOM_RENDERER: &str = "react-dom";
pub const BUNDLER: &str = "vite";
pub const FRAMEWORK_BUNDLER_PLUGIN: &str = "@vitejs/plugin-react";
pub const ROUTER: &str = "react-router";

pub const LINT_TOOLCHAIN: &[&str] = &[
    "@eslint/js",
    "eslint",
    "eslint-plugin-react-hooks",
    "eslint-plugin-react-refresh",
    "globals",
];
pub const TYPE_CHECKER: &str = "typescript";
pub const STYLING_ENGINE: &str = "tailwindcss";
pub const STYLING_BUNDLER_PLUGIN: &str = "@tailwindcss/vite";

/// Packages a project needs, derived from its flags and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    pub dependencies: BTreeSet<String>,
    pub dev_dependencies: BTreeSet<String>,
}

impl DependencySet {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// The packages not yet declared in a `package.json` body, in either
    /// section. Declared entries keep the generator's version ranges.
    pub fn undeclared_in(&self, manifest: &str) -> Result<DependencySet> {
        let value: serde_json::Value = serde_json::from_str(manifest)?;
        let declared: BTreeSet<&str> = ["dependencies", "devDependencies"]
            .iter()
            .filter_map(|section| value.get(section).and_then(|s| s.as_object()))
            .flat_map(|section| section.keys().map(String::as_str))
            .collect();
        let keep = |set: &BTreeSet<String>| -> BTreeSet<String> {
            set.iter()
                .filter(|name| !declared.contains(name.as_str()))
                .cloned()
                .collect()
        };
        Ok(DependencySet {
            dependencies: keep(&self.dependencies),
            dev_dependencies: keep(&self.dev_dependencies),
        })
    }
}

pub fn plan(flags: &FeatureFlags) -> DependencySet {
    let mut dependencies: BTreeSet<String> = [
        FRAMEWORK_RUNTIME,
        DOM_RENDERER,
        BUNDLER,
        FRAMEWORK_BUNDLER_PLUGIN,
    ]
    .into_iter()
    .map(String::from)
    .collect();
    if flags.routing {
        dependencies.insert(ROUTER.to_string());
    }

    let mut dev_dependencies: BTreeSet<String> =
        LINT_TOOLCHAIN.iter().copied().map(String::from).collect();
    if flags.is_ts() {
        dev_dependencies.insert(TYPE_CHECKER.to_string());
    }
    if flags.is_tailwind() {
        dev_dependencies.insert(STYLING_ENGINE.to_string());
        dev_dependencies.insert(STYLING_BUNDLER_PLUGIN.to_string());
    }

    DependencySet {
        dependencies,
        dev_dependencies,
    }
}
