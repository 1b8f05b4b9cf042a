//! Persistence codecs and file helpers.
//!
//! JSON snapshots are the full-state round-trip format (declared aggregates
//! included); CSV is a transaction-only interchange format whose aggregates
//! the caller must rebuild.

pub mod csv_codec;
pub mod snapshot;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::TrackerError;

pub type Result<T> = std::result::Result<T, TrackerError>;

const TMP_SUFFIX: &str = "tmp";

pub(crate) fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes via a temp file and rename so an interrupted save never leaves a
/// half-written target behind.
pub(crate) fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_write_preserves_the_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_atomic(&path, "original").unwrap();

        // A directory squatting on the temp path forces File::create to fail.
        fs::create_dir_all(tmp_path(&path)).unwrap();
        assert!(write_atomic(&path, "updated").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }
}
