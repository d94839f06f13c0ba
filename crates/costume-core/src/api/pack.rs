use std::path::{Path, PathBuf};

use super::companion_data_path;
use crate::container::{pack_with_options, BackupPolicy, PackOptions};
use crate::{CostumeError, Result};

pub fn prepare() -> PackApi {
    PackApi::default()
}

#[derive(Default, Debug)]
pub struct PackApi {
    image: Option<PathBuf>,
    data: Option<PathBuf>,
    options: PackOptions,
}

impl PackApi {
    pub fn with_options(mut self, options: PackOptions) -> Self {
        self.options = options;
        self
    }

    /// The JPEG that receives the costume data, rewritten in place
    pub fn with_image(mut self, image: impl AsRef<Path>) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// The costume data file, defaults to the image's `.dat` companion
    pub fn with_data(mut self, data: impl AsRef<Path>) -> Self {
        self.data = Some(data.as_ref().to_path_buf());
        self
    }

    /// Like [`PackApi::with_data`], `None` keeps the companion default
    pub fn use_data(mut self, data: Option<PathBuf>) -> Self {
        self.data = data;
        self
    }

    pub fn with_backup_policy(mut self, policy: BackupPolicy) -> Self {
        self.options.backup_policy = policy;
        self
    }

    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.backup_suffix = suffix.into();
        self
    }

    /// Packs and returns the path of the backup that was made
    pub fn execute(self) -> Result<PathBuf> {
        let Some(image) = self.image else {
            return Err(CostumeError::ImageNotSet);
        };
        let data = self.data.unwrap_or_else(|| companion_data_path(&image));

        pack_with_options(&image, &data, &self.options)
    }
}
