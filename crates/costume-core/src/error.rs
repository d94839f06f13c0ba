use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostumeError {
    /// Represents a failed filesystem interaction, for example a missing file or a full disk
    #[error("I/O error on '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents an input that is not a JPEG or has no locatable end of image marker
    #[error("Malformed container: {reason}")]
    MalformedContainer { reason: String },

    /// Represents an unpack of an image that carries no costume data
    #[error("No costume data found")]
    NoPayload,

    /// Represents a pack onto an image that already carries costume data
    #[error("Image already contains costume data")]
    AlreadyPacked,

    /// Represents a pack that would replace a previous backup
    #[error("Backup file '{}' already exists", path.display())]
    BackupExists { path: PathBuf },

    /// Represents costume data that does not fit into the footer length field
    #[error("Costume data of {len} bytes exceeds the maximum of 4294967295 bytes")]
    PayloadTooLarge { len: usize },

    /// Represents an unpack whose data file is the image it reads from
    #[error("Costume data file '{}' is the image itself", path.display())]
    SamePath { path: PathBuf },

    #[error("API Error: No JPEG image set")]
    ImageNotSet,
}

impl CostumeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CostumeError::MalformedContainer {
            reason: reason.into(),
        }
    }

    /// true for filesystem failures, false for anything about the container format
    pub fn is_io(&self) -> bool {
        matches!(self, CostumeError::IoError { .. })
    }
}

/// Attaches the path an I/O operation was working on.
pub(crate) trait IoContext<T> {
    fn at_path(self, path: &Path) -> Result<T, CostumeError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T, CostumeError> {
        self.map_err(|source| CostumeError::IoError {
            path: path.to_path_buf(),
            source,
        })
    }
}
