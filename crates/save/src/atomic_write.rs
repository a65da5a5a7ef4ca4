//! Atomic file write using the write-rename pattern.
//!
//! Writes data to a temporary file (`{path}.tmp`), calls `sync_all()` to
//! ensure bytes are flushed to persistent storage, then atomically renames
//! the temp file to the final path. A crash mid-write can therefore never
//! corrupt an existing settings file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically writes `data` to `path` using the write-rename pattern.
///
/// 1. Write to `{path}.tmp`
/// 2. `sync_all()` to flush to disk
/// 3. `rename` temp to final path (atomic on POSIX; near-atomic on Windows)
///
/// If the process crashes during step 1 or 2, the original file at `path`
/// remains untouched.
pub fn atomic_write(path: &str, data: &[u8]) -> std::io::Result<()> {
    let final_path = Path::new(path);
    let tmp_path = format!("{}.tmp", path);

    if let Some(parent) = final_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, final_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_dir(name: &str) -> String {
        let dir = format!("/tmp/petgarden_atomic_write_test_{}", name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = test_dir("creates_file");
        let path = format!("{}/settings.bin", dir);

        atomic_write(&path, b"hello world").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello world");
        assert!(!Path::new(&format!("{}.tmp", path)).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let dir = test_dir("overwrites");
        let path = format!("{}/settings.bin", dir);

        atomic_write(&path, b"version 1").unwrap();
        atomic_write(&path, b"version 2").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"version 2");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = test_dir("parent_dirs");
        let path = format!("{}/nested/deep/settings.bin", dir);

        atomic_write(&path, b"nested data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"nested data");

        let _ = fs::remove_dir_all(&dir);
    }
}
