use std::path::PathBuf;

use clap::{Args, ValueEnum};
use costume_core::api::companion_data_path;
use costume_core::{commands, BackupPolicy, Mode, PackOptions};

use crate::CliResult;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackupMode {
    /// Fail if a backup already exists
    #[default]
    Refuse,
    /// Replace an existing backup
    Overwrite,
    /// Add the current unix time to the backup name
    Timestamped,
}

impl From<BackupMode> for BackupPolicy {
    fn from(mode: BackupMode) -> Self {
        match mode {
            BackupMode::Refuse => BackupPolicy::Refuse,
            BackupMode::Overwrite => BackupPolicy::Overwrite,
            BackupMode::Timestamped => BackupPolicy::Timestamped,
        }
    }
}

/// Packs costume data into a JPEG image, keeping a backup of the original
#[derive(Args, Debug)]
pub struct PackArgs {
    /// JPEG image that receives the costume data, rewritten in place
    #[arg(value_name = "JPEG")]
    pub image: PathBuf,

    /// Costume data file, defaults to the image path with a .dat extension
    #[arg(short, long, value_name = "DATA")]
    pub data: Option<PathBuf>,

    /// What to do when the backup file already exists
    #[arg(long, value_enum, default_value_t = BackupMode::Refuse)]
    pub backup: BackupMode,

    /// Suffix appended to the image file name for the backup
    #[arg(long, value_name = "SUFFIX", default_value = costume_core::container::DEFAULT_BACKUP_SUFFIX)]
    pub backup_suffix: String,
}

impl PackArgs {
    pub fn run(self) -> CliResult<()> {
        let options = PackOptions {
            backup_policy: self.backup.into(),
            backup_suffix: self.backup_suffix,
        };

        let data = self.data.unwrap_or_else(|| companion_data_path(&self.image));

        let backup = commands::run(Mode::Pack, &self.image, &data, &options)?;

        println!(
            "Packed costume data from '{}' into '{}'",
            data.display(),
            self.image.display()
        );
        if let Some(backup) = backup {
            println!("Backup of the original image: '{}'", backup.display());
        }

        Ok(())
    }
}
