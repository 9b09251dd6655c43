//! One-time backup of the main raster.

use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::IconError;

/// Result of [`backup_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new backup was written.
    Created(PathBuf),
    /// A backup was already there and was left untouched.
    AlreadyPresent(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BackupOutcome::Created(path) | BackupOutcome::AlreadyPresent(path) => path,
        }
    }
}

/// Copy `file` to `backup` unless `backup` already exists.
///
/// The destination is opened with `create_new`, so the existence check and
/// the copy happen as one step and an existing backup is never overwritten.
/// Permissions and modification time are carried over from `file`.
pub fn backup_once(file: &Path, backup: &Path) -> Result<BackupOutcome, IconError> {
    let to_err = |source: io::Error| IconError::Backup {
        path: backup.to_path_buf(),
        source,
    };

    let mut src = File::open(file).map_err(to_err)?;
    let metadata = src.metadata().map_err(to_err)?;

    let mut dest = match OpenOptions::new().write(true).create_new(true).open(backup) {
        Ok(dest) => dest,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(event = "backup_skipped", path = %backup.display());
            return Ok(BackupOutcome::AlreadyPresent(backup.to_path_buf()));
        }
        Err(e) => return Err(to_err(e)),
    };

    if let Err(e) = copy_with_metadata(&mut src, &mut dest, &metadata) {
        drop(dest);
        // drop the partial copy so a later run can retry
        let _ = fs::remove_file(backup);
        return Err(to_err(e));
    }

    tracing::debug!(event = "backup_created", path = %backup.display());
    Ok(BackupOutcome::Created(backup.to_path_buf()))
}

fn copy_with_metadata(src: &mut File, dest: &mut File, metadata: &fs::Metadata) -> io::Result<()> {
    io::copy(src, dest)?;
    dest.set_permissions(metadata.permissions())?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    dest.set_times(times)?;
    dest.sync_all()
}
