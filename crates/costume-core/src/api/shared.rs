use std::path::{Path, PathBuf};

pub const COMPANION_EXTENSION: &str = "dat";

/// The data file that belongs to an image when none is named: same path,
/// `.dat` extension.
pub fn companion_data_path(image: impl AsRef<Path>) -> PathBuf {
    image.as_ref().with_extension(COMPANION_EXTENSION)
}
