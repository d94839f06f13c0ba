use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Shows whether a JPEG image carries costume data
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JPEG image to look at
    #[arg(value_name = "JPEG")]
    pub image: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        let info = costume_core::api::inspect::prepare()
            .from_image(&self.image)
            .execute()?;

        println!("File:          {}", self.image.display());
        println!("File size:     {} bytes", info.file_len);
        println!("Image data:    {} bytes in {} segments", info.image_len, info.segment_count);
        match info.payload_len {
            Some(len) => println!("Costume data:  {len} bytes"),
            None => println!("Costume data:  none"),
        }
        if let Some(datasets) = info.iptc_datasets {
            println!("IPTC record:   {datasets} datasets in APP13");
        }
        if info.unrecognized_len > 0 {
            println!("Unrecognized:  {} bytes after the image", info.unrecognized_len);
        }

        Ok(())
    }
}
