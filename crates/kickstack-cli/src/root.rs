use std::path::{Path, PathBuf};

/// Resolve the directory the project folder is created in.
///
/// Priority:
/// 1. `--dir` flag / `KICKSTACK_DIR` env var (passed in as `explicit`)
/// 2. The current working directory
pub fn resolve_base(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
