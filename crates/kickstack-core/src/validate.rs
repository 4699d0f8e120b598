//! Post-conditions checked after cleanup and patching, before any package
//! installation is attempted.

use crate::error::{KickstackError, Result, ValidationFailure};
use crate::io;
use crate::patch::{has_tailwind_directive, PatchReport};
use crate::paths;
use crate::template::TAILWIND_DIRECTIVE;
use crate::types::ProjectSpec;
use std::path::PathBuf;

/// Literal substrings from the upstream demo template.
pub const DEMO_MARKERS: &[&str] = &[
    "Vite + React",
    "logo",
    "count is",
    "react.svg",
    "vite.svg",
    "read-the-docs",
];

pub const REQUIRED_SCRIPTS: &[&str] = &["dev", "build", "preview", "lint"];
pub const ROUTER_MARKER: &str = "RouterProvider";
pub const TAILWIND_PLUGIN_MARKER: &str = "tailwindcss()";

/// Run every check and collect the failures. I/O errors other than a
/// missing file are returned as errors.
pub fn check(
    spec: &ProjectSpec,
    patches: &[PatchReport],
    extra_markers: &[String],
) -> Result<Vec<ValidationFailure>> {
    let root = spec.directory();
    let flags = spec.flags();
    let mut failures = Vec::new();

    let markers: Vec<&str> = DEMO_MARKERS
        .iter()
        .copied()
        .chain(extra_markers.iter().map(String::as_str))
        .collect();

    // 1. Root component and its stylesheet are free of demo content
    for rel in [paths::app_component(&flags), paths::APP_CSS.to_string()] {
        let Some(contents) = read(spec, &rel, &mut failures)? else {
            continue;
        };
        if let Some(marker) = markers.iter().find(|m| contents.contains(**m)) {
            failures.push(ValidationFailure::DemoContent {
                file: PathBuf::from(&rel),
                marker: marker.to_string(),
            });
        }
    }

    // 2. Feature markers
    if flags.is_tailwind() {
        if let Some(css) = read(spec, paths::INDEX_CSS, &mut failures)? {
            if !has_tailwind_directive(&css) {
                failures.push(ValidationFailure::MissingDirective {
                    file: PathBuf::from(paths::INDEX_CSS),
                    directive: TAILWIND_DIRECTIVE.to_string(),
                });
            }
        }
        let rel = paths::build_config(&flags);
        if let Some(cfg) = read(spec, &rel, &mut failures)? {
            if !cfg.contains(TAILWIND_PLUGIN_MARKER) {
                failures.push(ValidationFailure::MissingFeatureMarker {
                    file: PathBuf::from(&rel),
                    marker: TAILWIND_PLUGIN_MARKER.to_string(),
                });
            }
        }
    }
    if flags.routing {
        let rel = paths::main_entry(&flags);
        if let Some(main) = read(spec, &rel, &mut failures)? {
            if !main.contains(ROUTER_MARKER) {
                failures.push(ValidationFailure::MissingFeatureMarker {
                    file: PathBuf::from(&rel),
                    marker: ROUTER_MARKER.to_string(),
                });
            }
        }
    }

    // 3. Required patches completed; rules not required by the flags are ignored
    for report in patches.iter().filter(|r| r.required && r.is_incomplete()) {
        failures.push(ValidationFailure::PatchIncomplete {
            rule: report.rule.clone(),
            target: report.target.clone(),
            reason: report.reason.clone().unwrap_or_default(),
        });
    }

    // 4. Package manifest declares the standard scripts
    if let Some(manifest) = read(spec, paths::PACKAGE_JSON, &mut failures)? {
        if let Err(detail) = check_manifest(&manifest) {
            failures.push(ValidationFailure::Manifest(detail));
        }
    }

    tracing::debug!(root = %root.display(), failures = failures.len(), "validation checked");
    Ok(failures)
}

/// Fail with [`KickstackError::Validation`] if any check fails.
pub fn validate(spec: &ProjectSpec, patches: &[PatchReport], extra_markers: &[String]) -> Result<()> {
    let failures = check(spec, patches, extra_markers)?;
    if failures.is_empty() {
        Ok(())
    } else {
        Err(KickstackError::Validation(failures))
    }
}

fn read(
    spec: &ProjectSpec,
    rel: &str,
    failures: &mut Vec<ValidationFailure>,
) -> Result<Option<String>> {
    let contents = io::read_if_exists(&paths::resolve(spec.directory(), rel))?;
    if contents.is_none() {
        failures.push(ValidationFailure::MissingFile {
            file: PathBuf::from(rel),
        });
    }
    Ok(contents)
}

fn check_manifest(raw: &str) -> std::result::Result<(), String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("not valid JSON: {e}"))?;
    let scripts = value
        .get("scripts")
        .and_then(|s| s.as_object())
        .ok_or_else(|| "no \"scripts\" object".to_string())?;
    let missing: Vec<&str> = REQUIRED_SCRIPTS
        .iter()
        .copied()
        .filter(|s| !scripts.contains_key(*s))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing scripts: {}", missing.join(", ")))
    }
}
