use crate::output::{patch_table, print_report_json};
use crate::prompt::DialoguerPrompter;
use anyhow::Context;
use kickstack_core::{
    config::{Config, WarnLevel},
    external::Prompter,
    pipeline::{Pipeline, PipelineOptions, RunReport},
    toolchain::Toolchain,
    types::{FeatureFlags, Variant},
    variant::{self, ProjectTarget},
    KickstackError,
};
use std::path::{Path, PathBuf};

pub const DEV_PROMPT: &str = "Start the dev server now?";

pub struct CreateArgs {
    pub name: Option<String>,
    pub variant: Option<Variant>,
    pub router: Option<bool>,
    pub dev: Option<bool>,
    pub base: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    // Name and target folder are checked before any prompt or subprocess.
    let target = ProjectTarget::new(args.name.as_deref().unwrap_or(""), &args.base)?;

    let prompter = DialoguerPrompter;
    let variant = match args.variant {
        Some(v) => v,
        None => variant::prompt_variant(&prompter)?,
    };
    let routing = match args.router {
        Some(r) => r,
        None => variant::prompt_routing(&prompter)?,
    };
    let spec = target.with_flags(FeatureFlags::from_variant(variant, routing));

    // In JSON mode stdout carries only the report.
    let toolchain = Toolchain::detect(&config)?.stdout_to_stderr(args.json);
    let pm = toolchain.manager().binary();
    let dir = spec.directory().to_path_buf();
    let name = spec.name().to_string();

    if !args.json {
        println!("Variant: {}", variant.label());
        println!(
            "Router:  {}",
            if routing { "React Router (data router)" } else { "none" }
        );
        println!("Scaffolding {name} with Vite...");
    }

    let mut pipeline = Pipeline::new(&toolchain, &toolchain, PipelineOptions::from(&config));
    let result = pipeline.run(spec);
    let report = result.with_context(|| abort_message(pipeline.stage(), &dir))?;

    if args.json {
        print_report_json(&report)?;
    } else {
        print_summary(&report);
    }

    let start_dev = match args.dev {
        Some(d) => d,
        None => prompter.confirm(DEV_PROMPT, false).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dev server prompt unavailable, not starting");
            false
        }),
    };
    if start_dev {
        toolchain
            .run_script(&dir, "dev")
            .context("dev server exited with an error")?;
        return Ok(());
    }

    if !args.json {
        println!("\nProject ready!");
        println!("  cd {name}");
        println!("  {pm} run dev");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let config = Config::load(path).with_context(|| format!("failed to load {}", path.display()))?;

    let mut errors = Vec::new();
    for warning in config.validate() {
        match warning.level {
            WarnLevel::Warning => tracing::warn!(config = %path.display(), "{}", warning.message),
            WarnLevel::Error => errors.push(warning.message),
        }
    }
    if !errors.is_empty() {
        return Err(KickstackError::Config(errors.join("; ")).into());
    }
    Ok(config)
}

fn abort_message(stage: kickstack_core::types::Stage, dir: &Path) -> String {
    if dir.exists() {
        format!(
            "run aborted after stage '{stage}'; partial project left at {}",
            dir.display()
        )
    } else {
        format!("run aborted after stage '{stage}'")
    }
}

fn print_summary(report: &RunReport) {
    println!("\nCleaned {} file(s):", report.written.len());
    for path in &report.written {
        println!("  written: {}", path.display());
    }
    for path in &report.removed {
        println!("  removed: {}", path.display());
    }

    println!("\nPatches:");
    print!("{}", patch_table(&report.patches));

    let deps = &report.dependencies;
    println!(
        "\nPlanned {} dependencies and {} dev dependencies.",
        deps.dependencies.len(),
        deps.dev_dependencies.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickstack_core::types::Stage;
    use tempfile::TempDir;

    #[test]
    fn abort_message_mentions_partial_dir_only_when_present() {
        let dir = TempDir::new().unwrap();
        let msg = abort_message(Stage::Patched, dir.path());
        assert!(msg.contains("'patched'"));
        assert!(msg.contains("partial project left at"));

        let missing = dir.path().join("nope");
        let msg = abort_message(Stage::FlagsResolved, &missing);
        assert_eq!(msg, "run aborted after stage 'flags_resolved'");
    }

    #[test]
    fn config_errors_are_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kickstack.yaml");
        std::fs::write(&path, "vite_version: ''\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("vite_version"));
    }

    #[test]
    fn no_config_path_is_default() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.vite_version, "latest");
    }
}
