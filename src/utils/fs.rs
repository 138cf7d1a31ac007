// src/utils/fs.rs
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while an output file is being written.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".partial");
    path.with_file_name(name)
}

/// Run `write` against a staging file, then move it over `path`.
///
/// On failure the staging file is removed and `path` is left untouched.
pub fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let result = write(&staging).and_then(|_| fs::rename(&staging, path));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("index.html");
        fs::write(&target, "old").unwrap();

        replace_file(&target, |tmp| fs::write(tmp, "new")).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("overlay.png");

        let result = replace_file(&target, |tmp| {
            fs::write(tmp, "half")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert!(result.is_err());
        assert!(!target.exists());
        assert!(!staging_path(&target).exists());
    }
}
