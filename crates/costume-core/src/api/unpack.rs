use std::path::{Path, PathBuf};

use super::companion_data_path;
use crate::container::unpack;
use crate::{CostumeError, Result};

pub fn prepare() -> UnpackApi {
    UnpackApi::default()
}

#[derive(Default, Debug)]
pub struct UnpackApi {
    image: Option<PathBuf>,
    data: Option<PathBuf>,
}

impl UnpackApi {
    /// The JPEG that carries the costume data, used readonly
    pub fn from_image(mut self, image: impl AsRef<Path>) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the costume data is written to, defaults to the image's `.dat` companion
    pub fn into_data_file(mut self, data: impl AsRef<Path>) -> Self {
        self.data = Some(data.as_ref().to_path_buf());
        self
    }

    pub fn use_data_file(mut self, data: Option<PathBuf>) -> Self {
        self.data = data;
        self
    }

    /// Unpacks and returns the path of the written data file
    pub fn execute(self) -> Result<PathBuf> {
        let Some(image) = self.image else {
            return Err(CostumeError::ImageNotSet);
        };
        let data = self.data.unwrap_or_else(|| companion_data_path(&image));

        unpack(&image, &data)?;

        Ok(data)
    }
}
