//! Narrow interfaces to the collaborators the core drives but does not own:
//! the upstream project generator, the package installer and the
//! interactive prompt. Every call is synchronous and awaited to completion.

use crate::deps::DependencySet;
use crate::error::Result;
use crate::types::ProjectSpec;
use std::path::Path;

/// Produces the unmodified upstream skeleton at `spec.directory()`.
pub trait Generator {
    fn scaffold(&self, spec: &ProjectSpec) -> Result<()>;
}

/// Installs the planned packages inside a populated project directory.
pub trait Installer {
    fn install(&self, dir: &Path, deps: &DependencySet) -> Result<()>;
}

/// Asks the user to pick among enumerated choices.
pub trait Prompter {
    /// Returns the index of the selected choice.
    fn select(&self, prompt: &str, choices: &[&str], default: usize) -> Result<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}
