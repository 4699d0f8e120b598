use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// A reader never observes a half-written file: either the old bytes or the new ones.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a file as UTF-8, returning `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove a file or a directory tree. Returns true if something was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(false);
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.css");
        atomic_write(&path, b"@import \"tailwindcss\";").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "@import \"tailwindcss\";"
        );
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vscode/extensions.json");
        atomic_write(&path, b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.css");
        std::fs::write(&path, ".logo { height: 6em; }").unwrap();
        atomic_write(&path, b"").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn read_if_exists_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_if_exists(&dir.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn remove_if_exists_handles_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("src/assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("react.svg"), "<svg/>").unwrap();
        let svg = dir.path().join("vite.svg");
        std::fs::write(&svg, "<svg/>").unwrap();

        assert!(remove_if_exists(&assets).unwrap());
        assert!(remove_if_exists(&svg).unwrap());
        assert!(!assets.exists());
        assert!(!svg.exists());
        assert!(!remove_if_exists(&svg).unwrap());
    }
}
