use log::warn;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use super::ops::{write_atomically, Clobber};
use super::options::BackupPolicy;
use crate::error::{CostumeError, IoContext};
use crate::result::Result;

/// Backs `original` up at `backup`, then replaces `target` with what `write`
/// produces. If the replace fails, a backup this call created is removed
/// again so the next attempt does not trip over it.
pub(super) fn replace_with_backup<F>(
    target: &Path,
    backup: &Path,
    original: &[u8],
    policy: BackupPolicy,
    write: F,
) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
{
    let permissions = fs::metadata(target).at_path(target)?.permissions();
    write_backup(backup, original, policy, Some(permissions))?;

    let replaced = write_atomically(target, Clobber::Replace, None, write);
    if replaced.is_err() && policy != BackupPolicy::Overwrite {
        if let Err(e) = fs::remove_file(backup) {
            warn!("Could not remove backup '{}': {e}", backup.display());
        }
    }

    replaced
}

/// Stores `original` at `backup`, honouring the policy for an existing file.
pub(super) fn write_backup(
    backup: &Path,
    original: &[u8],
    policy: BackupPolicy,
    permissions: Option<fs::Permissions>,
) -> Result<()> {
    let clobber = match policy {
        BackupPolicy::Overwrite => {
            if fs::symlink_metadata(backup).is_ok() {
                warn!("Overwriting previous backup '{}'", backup.display());
            }
            Clobber::Replace
        }
        BackupPolicy::Refuse | BackupPolicy::Timestamped => {
            if fs::symlink_metadata(backup).is_ok() {
                return Err(CostumeError::BackupExists {
                    path: backup.to_path_buf(),
                });
            }
            Clobber::Keep
        }
    };

    match write_atomically(backup, clobber, permissions, |file| file.write_all(original)) {
        // lost a race against another writer of the same backup
        Err(CostumeError::IoError { source, .. }) if source.kind() == ErrorKind::AlreadyExists => {
            Err(CostumeError::BackupExists {
                path: backup.to_path_buf(),
            })
        }
        other => other,
    }
}
