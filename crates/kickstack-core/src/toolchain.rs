//! Package-manager subprocesses: the upstream generator, the installer and
//! script runs.
//!
//! Every command inherits stdio so the package manager's own output reaches
//! the terminal, and is awaited to completion. A non-zero exit is fatal; there
//! is no retry.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{Config, PackageManager};
use crate::deps::DependencySet;
use crate::error::{KickstackError, Result};
use crate::external::{Generator, Installer};
use crate::io;
use crate::paths;
use crate::types::ProjectSpec;

#[derive(Debug, Clone)]
pub struct Toolchain {
    manager: PackageManager,
    binary: PathBuf,
    vite_version: String,
    rolldown: bool,
    stdout_to_stderr: bool,
}

impl Toolchain {
    /// Locate the configured package manager on `PATH`.
    pub fn detect(config: &Config) -> Result<Self> {
        let manager = config.package_manager;
        let binary = which::which(manager.binary()).map_err(|e| KickstackError::ExternalTool {
            tool: manager.binary().to_string(),
            detail: format!("not found on PATH ({e})"),
        })?;
        Ok(Self {
            manager,
            binary,
            vite_version: config.vite_version.trim().to_string(),
            rolldown: config.rolldown,
            stdout_to_stderr: false,
        })
    }

    /// Send child stdout to our stderr, keeping our own stdout clean for
    /// machine-readable output.
    pub fn stdout_to_stderr(mut self, on: bool) -> Self {
        self.stdout_to_stderr = on;
        self
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Arguments for `create vite`, minus the binary.
    pub fn create_args(&self, spec: &ProjectSpec) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            format!("vite@{}", self.vite_version),
            spec.name().to_string(),
        ];
        if self.manager == PackageManager::Npm {
            args.push("--".to_string());
        }
        args.extend([
            "--template".to_string(),
            spec.flags().language.upstream_template().to_string(),
            "--no-interactive".to_string(),
            if self.rolldown {
                "--rolldown".to_string()
            } else {
                "--no-rolldown".to_string()
            },
        ]);
        args
    }

    /// Argument lists for installing `deps`, in execution order.
    pub fn install_args(&self, deps: &DependencySet) -> Vec<Vec<String>> {
        let add = match self.manager {
            PackageManager::Npm => "install",
            PackageManager::Pnpm => "add",
        };
        let mut steps = vec![vec!["install".to_string()]];
        if !deps.dependencies.is_empty() {
            let mut step = vec![add.to_string()];
            step.extend(deps.dependencies.iter().cloned());
            steps.push(step);
        }
        if !deps.dev_dependencies.is_empty() {
            let mut step = vec![add.to_string(), "-D".to_string()];
            step.extend(deps.dev_dependencies.iter().cloned());
            steps.push(step);
        }
        steps
    }

    /// Run `<pm> run <script>` inside `dir`.
    pub fn run_script(&self, dir: &Path, script: &str) -> Result<()> {
        let args = vec!["run".to_string(), script.to_string()];
        self.exec(&args, dir, false)
    }

    fn exec(&self, args: &[String], cwd: &Path, ci: bool) -> Result<()> {
        let command_line = format!("{} {}", self.manager.binary(), args.join(" "));
        tracing::debug!(command = %command_line, cwd = %cwd.display(), "spawning");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(cwd);
        if ci {
            // Keeps the generator from prompting.
            cmd.env("CI", "1");
        }
        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(std::io::stderr()));
        }

        let status = cmd.status().map_err(|e| KickstackError::ExternalTool {
            tool: command_line.clone(),
            detail: e.to_string(),
        })?;
        if !status.success() {
            return Err(KickstackError::ExternalTool {
                tool: command_line,
                detail: status.to_string(),
            });
        }
        Ok(())
    }
}

impl Generator for Toolchain {
    fn scaffold(&self, spec: &ProjectSpec) -> Result<()> {
        let parent = spec.directory().parent().unwrap_or(Path::new("."));
        self.exec(&self.create_args(spec), parent, true)
    }
}

impl Installer for Toolchain {
    /// Runs the base install, then adds only the planned packages the
    /// scaffolded manifest does not already declare.
    fn install(&self, dir: &Path, deps: &DependencySet) -> Result<()> {
        let pending = match io::read_if_exists(&paths::resolve(dir, paths::PACKAGE_JSON))? {
            Some(manifest) => deps.undeclared_in(&manifest)?,
            None => deps.clone(),
        };
        if pending.is_empty() {
            tracing::debug!("every planned package is already declared");
        }
        for args in self.install_args(&pending) {
            self.exec(&args, dir, false)?;
        }
        Ok(())
    }
}
