use std::path::PathBuf;

use clap::Args;
use costume_core::api::companion_data_path;
use costume_core::{commands, Mode, PackOptions};

use crate::CliResult;

/// Unpacks costume data from a JPEG image
#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// JPEG image that carries costume data, used readonly
    #[arg(value_name = "JPEG")]
    pub image: PathBuf,

    /// Costume data is written to this file, defaults to the image path with a .dat extension
    #[arg(short, long, value_name = "DATA")]
    pub data: Option<PathBuf>,
}

impl UnpackArgs {
    pub fn run(self) -> CliResult<()> {
        let data = self.data.unwrap_or_else(|| companion_data_path(&self.image));

        commands::run(Mode::Unpack, &self.image, &data, &PackOptions::default())?;

        println!(
            "Unpacked costume data from '{}' into '{}'",
            self.image.display(),
            data.display()
        );

        Ok(())
    }
}
