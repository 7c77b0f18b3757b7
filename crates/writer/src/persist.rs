//! All-or-nothing file persistence.
//!
//! The container is saved to a temp file in the destination directory (same
//! filesystem, so the final rename cannot cross devices), synced, and renamed
//! over the destination. On any error the temp file is removed and the
//! destination is neither created nor truncated.

use crate::error::{Result, WriteError};
use std::fs::{self, File};
use std::path::Path;

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for bare file names like `out.xlsx`
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Run `save` against a temp path, then move the result to `dest`.
///
/// `save` receives a path that already exists and must overwrite it.
pub(crate) fn persist_atomically<T>(
    dest: &Path,
    save: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir).map_err(|err| WriteError::io(dir, err))?;

    let tmp = tempfile::Builder::new()
        .prefix(".rowbook-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|err| WriteError::io(dir, err))?;
    let tmp_path = tmp.into_temp_path();
    let tmp_ref: &Path = &tmp_path;

    let out = save(tmp_ref)?;

    File::open(tmp_ref)
        .and_then(|f| f.sync_all())
        .map_err(|err| WriteError::io(tmp_ref, err))?;

    tmp_path
        .persist(dest)
        .map_err(|err| WriteError::io(dest, err.error))?;

    // Best effort: the file is already in place
    let _ = File::open(dir).and_then(|d| d.sync_all());

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn leftover_temp_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".rowbook-"))
            .collect()
    }

    #[test]
    fn test_persist_success() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        persist_atomically(&dest, |tmp| {
            let mut f = File::create(tmp).map_err(|e| WriteError::io(tmp, e))?;
            f.write_all(b"payload").map_err(|e| WriteError::io(tmp, e))?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"payload");
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");

        let result: Result<()> = persist_atomically(&dest, |tmp| {
            fs::write(tmp, b"partial").unwrap();
            Err(WriteError::EmptyWorkbook)
        });

        assert!(matches!(result, Err(WriteError::EmptyWorkbook)));
        assert!(!dest.exists());
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        fs::write(&dest, b"old").unwrap();

        let result: Result<()> = persist_atomically(&dest, |_| Err(WriteError::EmptyWorkbook));

        assert!(result.is_err());
        assert_eq!(fs::read(&dest).unwrap(), b"old");
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.bin");
        fs::write(&dest, b"old").unwrap();

        persist_atomically(&dest, |tmp| fs::write(tmp, b"new").map_err(|e| WriteError::io(tmp, e)))
            .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a").join("b").join("out.bin");

        persist_atomically(&dest, |tmp| fs::write(tmp, b"x").map_err(|e| WriteError::io(tmp, e)))
            .unwrap();

        assert!(dest.exists());
    }

    #[test]
    fn test_parent_dir_or_dot() {
        assert_eq!(parent_dir_or_dot(Path::new("out.xlsx")), Path::new("."));
        assert_eq!(parent_dir_or_dot(Path::new("tmp/out.xlsx")), Path::new("tmp"));
    }
}
