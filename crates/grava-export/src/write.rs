//! Atomic output-file writing.
//!
//! Artifacts must never be left half-written at their destination: the
//! contents go to a sibling temporary file first, which is then renamed
//! over the destination. The rename is atomic on the platforms this
//! tool targets, so readers either see the previous file or the
//! complete new one.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while persisting an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing or renaming the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The destination path of the artifact.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// Write `contents` to `path` atomically.
///
/// The contents are written to `<path>.tmp` in the same directory and
/// renamed into place, so the destination never holds a truncated
/// artifact. The temporary file is removed on failure.
///
/// # Errors
///
/// Returns [`ExportError::Io`] with the destination path when the
/// temporary write or the rename fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ExportError> {
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp, contents)
        .inspect_err(|_| {
            // A partial temporary file may exist after a mid-write
            // failure.
            let _ = fs::remove_file(&tmp);
        })
        .map_err(&io_err)?;
    fs::rename(&tmp, path)
        .inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
        .map_err(&io_err)?;

    Ok(())
}
