use std::path::{Path, PathBuf};

use crate::container::{inspect, ContainerInfo};
use crate::{CostumeError, Result};

pub fn prepare() -> InspectApi {
    InspectApi::default()
}

#[derive(Default, Debug)]
pub struct InspectApi {
    image: Option<PathBuf>,
}

impl InspectApi {
    pub fn from_image(mut self, image: impl AsRef<Path>) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<ContainerInfo> {
        let Some(image) = self.image else {
            return Err(CostumeError::ImageNotSet);
        };

        inspect(&image)
    }
}
