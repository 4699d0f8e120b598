//! The run state machine:
//! init → name_validated → flags_resolved → scaffolded → cleaned → patched →
//! validated → dependencies_installed → done.
//!
//! Any error aborts the run at the current stage. Nothing is rolled back; a
//! partially populated project directory is left in place.

use crate::config::{BuildConfigMode, Config};
use crate::deps::{self, DependencySet};
use crate::error::{KickstackError, Result};
use crate::external::{Generator, Installer};
use crate::patch::{self, PatchReport};
use crate::template::{self, FileRole};
use crate::types::{ProjectSpec, Stage};
use crate::validate;
use crate::variant::{self, RawSelections};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub build_config: BuildConfigMode,
    pub remove_demo_assets: bool,
    pub extra_demo_markers: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            build_config: cfg.build_config,
            remove_demo_assets: cfg.remove_demo_assets,
            extra_demo_markers: cfg.extra_demo_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub spec: ProjectSpec,
    pub stage: Stage,
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub patches: Vec<PatchReport>,
    pub dependencies: DependencySet,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline<'a> {
    generator: &'a dyn Generator,
    installer: &'a dyn Installer,
    options: PipelineOptions,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        generator: &'a dyn Generator,
        installer: &'a dyn Installer,
        options: PipelineOptions,
    ) -> Self {
        Self {
            generator,
            installer,
            options,
            stage: Stage::Init,
        }
    }

    /// Last stage reached. After a failed run this is the stage that was
    /// completed before the error.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, to: Stage) {
        debug_assert!(to > self.stage, "stage {to} does not follow {}", self.stage);
        tracing::info!(from = %self.stage, to = %to, "stage");
        self.stage = to;
    }

    /// Resolve raw selections, then run the full pipeline.
    pub fn execute(&mut self, raw: &RawSelections, base_dir: &Path) -> Result<RunReport> {
        self.stage = Stage::Init;
        let spec = variant::resolve(raw, base_dir)?;
        self.advance(Stage::NameValidated);
        self.run(spec)
    }

    /// Run from a resolved spec. Holding a `ProjectSpec` means the name was
    /// already validated, so a fresh pipeline steps through that stage too.
    pub fn run(&mut self, spec: ProjectSpec) -> Result<RunReport> {
        if self.stage > Stage::NameValidated {
            self.stage = Stage::Init;
        }
        if self.stage < Stage::NameValidated {
            self.advance(Stage::NameValidated);
        }
        self.advance(Stage::FlagsResolved);
        let flags = spec.flags();
        let root = spec.directory().to_path_buf();
        tracing::info!(name = spec.name(), flags = ?flags, "resolved project");

        // Upstream skeleton
        self.generator.scaffold(&spec)?;
        if !root.is_dir() {
            return Err(KickstackError::ExternalTool {
                tool: "generator".to_string(),
                detail: format!("exited successfully but {} was not created", root.display()),
            });
        }
        self.advance(Stage::Scaffolded);

        // Strip demo content
        let removed = if self.options.remove_demo_assets {
            template::remove_demo_assets(&root)?
        } else {
            Vec::new()
        };
        let overwrite_build_config = self.options.build_config == BuildConfigMode::Overwrite;
        let written = template::write_templates(&root, &flags, |f| {
            f.role != FileRole::BuildConfig || overwrite_build_config
        })?;
        self.advance(Stage::Cleaned);

        // Adapt upstream-owned files
        let patches = patch::apply_all(&root, &patch::rules_for(&spec))?;
        self.advance(Stage::Patched);

        validate::validate(&spec, &patches, &self.options.extra_demo_markers)?;
        self.advance(Stage::Validated);

        let dependencies = deps::plan(&flags);
        self.installer.install(&root, &dependencies)?;
        self.advance(Stage::DependenciesInstalled);

        self.advance(Stage::Done);
        Ok(RunReport {
            spec,
            stage: self.stage,
            written,
            removed,
            patches,
            dependencies,
            finished_at: Utc::now(),
        })
    }
}
