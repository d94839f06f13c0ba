use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::Write;

use crate::error::CostumeError;
use crate::result::Result;

/// Size of the big-endian payload length that opens every footer.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// The region appended after EOI: a u32 length followed by exactly that many payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadFooter<'a> {
    length: u32,
    payload: &'a [u8],
}

impl<'a> PayloadFooter<'a> {
    pub fn new(payload: &'a [u8]) -> Result<Self> {
        Ok(Self {
            length: length_field(payload.len())?,
            payload,
        })
    }

    /// Recognizes a footer only if the trailer is the length field plus exactly
    /// that many bytes, anything else is not a footer.
    pub fn parse(trailer: &'a [u8]) -> Option<Self> {
        let mut reader = trailer;
        let length = reader.read_u32::<BigEndian>().ok()?;

        (reader.len() == length as usize).then_some(Self {
            length,
            payload: reader,
        })
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn encoded_len(&self) -> usize {
        LENGTH_FIELD_SIZE + self.payload.len()
    }

    pub fn append_to(&self, out: &mut Vec<u8>) {
        let mut field = [0u8; LENGTH_FIELD_SIZE];
        BigEndian::write_u32(&mut field, self.length);
        out.extend_from_slice(&field);
        out.extend_from_slice(self.payload);
    }

    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u32::<BigEndian>(self.length)?;
        writer.write_all(self.payload)
    }
}

fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CostumeError::PayloadTooLarge { len })
}
