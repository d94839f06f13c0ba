use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_BACKUP_SUFFIX: &str = "bak";

/// What pack does about the backup copy it makes before rewriting an image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BackupPolicy {
    /// `<image>.bak`, fail with `BackupExists` if it is already there
    #[default]
    Refuse,
    /// `<image>.bak`, replacing a previous backup
    Overwrite,
    /// `<image>.<unix seconds>.bak`, fail with `BackupExists` on a collision
    Timestamped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    pub backup_policy: BackupPolicy,
    /// Appended to the image file name, without the leading dot.
    pub backup_suffix: String,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            backup_policy: BackupPolicy::default(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

impl PackOptions {
    pub fn backup_path(&self, image: &Path) -> PathBuf {
        match self.backup_policy {
            BackupPolicy::Refuse | BackupPolicy::Overwrite => {
                with_suffix(image, [OsStr::new(&self.backup_suffix)])
            }
            BackupPolicy::Timestamped => {
                let seconds = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default()
                    .to_string();
                with_suffix(image, [OsStr::new(&seconds), OsStr::new(&self.backup_suffix)])
            }
        }
    }
}

fn with_suffix<const N: usize>(path: &Path, suffixes: [&OsStr; N]) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    for suffix in suffixes {
        name.push(".");
        name.push(suffix);
    }
    PathBuf::from(name)
}
