//! The costume container: a JPEG image followed by a [`PayloadFooter`].
//!
//! ```text
//! FF D8 ... FF D9 | payload_length (u32, big-endian) | payload_bytes
//! \___ image ___/   \______________ footer _______________________/
//! ```
//!
//! Viewers stop reading at EOI, so the footer does not disturb the picture.

mod backup;
pub mod footer;
mod ops;
pub mod options;

pub use footer::{PayloadFooter, LENGTH_FIELD_SIZE};
pub use ops::{inspect, pack, pack_with_options, unpack, ContainerInfo};
pub use options::{BackupPolicy, PackOptions, DEFAULT_BACKUP_SUFFIX};

use crate::error::CostumeError;
use crate::jpeg::find_image_end;
use crate::result::Result;

/// A JPEG stream split at the end of its image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container<'a> {
    image: &'a [u8],
    trailer: &'a [u8],
}

impl<'a> Container<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (image, trailer) = data.split_at(find_image_end(data)?);
        Ok(Self { image, trailer })
    }

    /// SOI up to and including EOI.
    pub fn image(&self) -> &'a [u8] {
        self.image
    }

    /// Everything after EOI.
    pub fn trailer(&self) -> &'a [u8] {
        self.trailer
    }

    pub fn footer(&self) -> Option<PayloadFooter<'a>> {
        PayloadFooter::parse(self.trailer)
    }

    pub fn payload(&self) -> Result<&'a [u8]> {
        self.footer()
            .map(|footer| footer.payload())
            .ok_or(CostumeError::NoPayload)
    }

    /// Only a bare image may be packed. A footer means it was packed before,
    /// other trailing bytes would be lost or misread after packing.
    pub fn ensure_unpacked(&self) -> Result<()> {
        if self.trailer.is_empty() {
            return Ok(());
        }
        if self.footer().is_some() {
            return Err(CostumeError::AlreadyPacked);
        }

        Err(CostumeError::malformed(format!(
            "{} unrecognized bytes after the EOI marker",
            self.trailer.len()
        )))
    }
}

/// Appends `payload` to an unpacked JPEG stream.
pub fn embed(jpeg: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let container = Container::parse(jpeg)?;
    container.ensure_unpacked()?;
    let footer = PayloadFooter::new(payload)?;

    let mut packed = Vec::with_capacity(container.image().len() + footer.encoded_len());
    packed.extend_from_slice(container.image());
    footer.append_to(&mut packed);

    Ok(packed)
}

/// Returns the payload carried by a packed JPEG stream.
pub fn extract(packed: &[u8]) -> Result<&[u8]> {
    Container::parse(packed)?.payload()
}
