use std::path::{Path, PathBuf};

use crate::{PackOptions, Result};

/// The two things the tool does to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pack,
    Unpack,
}

/// Returns the path of the backup made of `image`.
pub fn pack(image: &Path, data: &Path, options: &PackOptions) -> Result<PathBuf> {
    crate::api::pack::prepare()
        .with_options(options.clone())
        .with_image(image)
        .with_data(data)
        .execute()
}

pub fn unpack(image: &Path, data: &Path) -> Result<()> {
    crate::api::unpack::prepare()
        .from_image(image)
        .into_data_file(data)
        .execute()
        .map(|_| ())
}

/// Runs one operation, yielding the backup a pack made. `options` only matter
/// for [`Mode::Pack`].
pub fn run(
    mode: Mode,
    image: &Path,
    data: &Path,
    options: &PackOptions,
) -> Result<Option<PathBuf>> {
    match mode {
        Mode::Pack => pack(image, data, options).map(Some),
        Mode::Unpack => unpack(image, data).map(|_| None),
    }
}
