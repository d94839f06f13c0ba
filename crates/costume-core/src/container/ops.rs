use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

use super::backup::replace_with_backup;
use super::options::PackOptions;
use super::{Container, PayloadFooter};
use crate::error::{CostumeError, IoContext};
use crate::jpeg::{find_iptc_record, MarkerScanner};
use crate::result::Result;

/// Embeds the contents of `data_path` into the JPEG at `jpeg_path`, keeping a
/// `.bak` copy of the original image.
pub fn pack(jpeg_path: &Path, data_path: &Path) -> Result<()> {
    pack_with_options(jpeg_path, data_path, &PackOptions::default()).map(|_| ())
}

/// Like [`pack`], returns where the backup was written.
///
/// Nothing is written until the costume data and the image have been read and
/// validated. The image is then replaced in one rename, so it is either fully
/// packed or left as it was. A backup made for a pack that failed is removed
/// again, unless it replaced an older one.
pub fn pack_with_options(
    jpeg_path: &Path,
    data_path: &Path,
    options: &PackOptions,
) -> Result<PathBuf> {
    let payload = read_file(data_path)?;
    let original = read_file(jpeg_path)?;

    let container = Container::parse(&original)?;
    container.ensure_unpacked()?;
    let footer = PayloadFooter::new(&payload)?;

    let backup = options.backup_path(jpeg_path);
    info!(
        "Making a backup of '{}' at '{}'",
        jpeg_path.display(),
        backup.display()
    );
    info!(
        "Packing {} bytes of costume data into '{}'",
        payload.len(),
        jpeg_path.display()
    );
    replace_with_backup(
        jpeg_path,
        &backup,
        &original,
        options.backup_policy,
        |file| {
            file.write_all(container.image())?;
            footer.write_to(file)
        },
    )?;

    Ok(backup)
}

/// Writes the costume data carried by `jpeg_path` to `data_path`, replacing
/// whatever was there. The image itself is only read.
pub fn unpack(jpeg_path: &Path, data_path: &Path) -> Result<()> {
    if is_same_file(jpeg_path, data_path) {
        return Err(CostumeError::SamePath {
            path: data_path.to_path_buf(),
        });
    }

    let packed = read_file(jpeg_path)?;
    let payload = Container::parse(&packed)?.payload()?;

    info!(
        "Unpacking {} bytes of costume data into '{}'",
        payload.len(),
        data_path.display()
    );
    write_atomically(data_path, Clobber::Replace, None, |file| file.write_all(payload))
}

/// What a JPEG file looks like from the container's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub file_len: usize,
    /// Bytes up to and including EOI.
    pub image_len: usize,
    /// Marker segments from SOI to EOI.
    pub segment_count: usize,
    /// Length of the embedded costume data, if there is any.
    pub payload_len: Option<usize>,
    /// Bytes after EOI that do not form a footer.
    pub unrecognized_len: usize,
    /// Datasets of an IPTC costume record kept in APP13, if the image has one.
    pub iptc_datasets: Option<usize>,
}

pub fn inspect(jpeg_path: &Path) -> Result<ContainerInfo> {
    let data = read_file(jpeg_path)?;
    let segment_count = MarkerScanner::new(&data).collect::<Result<Vec<_>>>()?.len();
    let container = Container::parse(&data)?;
    let payload_len = container.footer().map(|footer| footer.payload().len());
    let iptc_datasets = find_iptc_record(container.image())?;

    Ok(ContainerInfo {
        file_len: data.len(),
        image_len: container.image().len(),
        segment_count,
        payload_len,
        unrecognized_len: match payload_len {
            Some(_) => 0,
            None => container.trailer().len(),
        },
        iptc_datasets,
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).at_path(path)?;
    debug!("Read {} bytes from '{}'", data.len(), path.display());
    Ok(data)
}

/// Paths that do not exist yet are never the same file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Clobber {
    Replace,
    /// fail with `AlreadyExists` if the target exists
    Keep,
}

/// Writes into a temp file beside `target` and renames it into place. The temp
/// file is removed on every failure path.
///
/// A symlinked `target` stays a symlink, the file it points at is replaced.
/// The result gets `permissions` if given, else those of the file it
/// replaces, else the mode a newly created file would have.
pub(super) fn write_atomically<F>(
    target: &Path,
    clobber: Clobber,
    permissions: Option<fs::Permissions>,
    write: F,
) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
{
    let target = fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = temp_file_builder().tempfile_in(dir).at_path(dir)?;
    write(&mut temp)
        .and_then(|_| temp.as_file().sync_all())
        .at_path(temp.path())?;

    let permissions =
        permissions.or_else(|| fs::metadata(&target).ok().map(|meta| meta.permissions()));
    if let Some(permissions) = permissions {
        fs::set_permissions(temp.path(), permissions).at_path(temp.path())?;
    }

    let persisted = match clobber {
        Clobber::Replace => temp.persist(&target),
        Clobber::Keep => temp.persist_noclobber(&target),
    };
    persisted.map_err(|e| e.error).at_path(&target)?;
    debug!("Wrote '{}'", target.display());

    Ok(())
}

fn temp_file_builder() -> Builder<'static, 'static> {
    #[allow(unused_mut)]
    let mut builder = Builder::new();
    // what File::create asks for, narrowed by the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}
