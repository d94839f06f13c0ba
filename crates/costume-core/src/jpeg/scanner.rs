//! Walks the marker segments of a JPEG stream up to its End-Of-Image marker.
//!
//! Length-prefixed segments are skipped by their declared length, so thumbnails
//! nested in APP segments never surface. Entropy-coded data after a SOS header
//! is skipped byte by byte, treating `FF 00`, `FF D0..D7` and `FF FF` as data.

use log::debug;

use super::marker::Marker;
use crate::error::CostumeError;
use crate::result::Result;

const SOI: [u8; 2] = [0xFF, 0xD8];

/// One marker found in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub marker: Marker,
    /// Offset of the 0xFF prefix.
    pub offset: usize,
    /// Bytes from `offset` up to the next marker, including any scan data.
    pub length: usize,
    /// Where the segment's contents start, past the marker and its length field.
    pub data_offset: usize,
}

impl Segment {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The segment's contents within the stream it was scanned from.
    pub fn data<'a>(&self, stream: &'a [u8]) -> &'a [u8] {
        &stream[self.data_offset..self.end()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Walking,
    Done,
}

/// Iterator over the segments of a JPEG stream, SOI first, ending after EOI
/// or with the first error.
pub struct MarkerScanner<'a> {
    data: &'a [u8],
    pos: usize,
    state: State,
}

impl<'a> MarkerScanner<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            state: State::Start,
        }
    }

    fn start_of_image(&mut self) -> Result<Segment> {
        if !self.data.starts_with(&SOI) {
            return Err(CostumeError::malformed("not a JPEG file (missing SOI marker)"));
        }
        self.pos = SOI.len();

        Ok(Segment {
            marker: Marker::SOI,
            offset: 0,
            length: SOI.len(),
            data_offset: SOI.len(),
        })
    }

    fn next_segment(&mut self) -> Result<Segment> {
        let data = self.data;
        let start = self.pos;

        match data.get(start) {
            None => return Err(missing_eoi()),
            Some(0xFF) => {}
            Some(other) => {
                return Err(CostumeError::malformed(format!(
                    "expected a marker at offset {start}, found 0x{other:02X}"
                )))
            }
        }

        // fill bytes may precede the marker type
        let mut type_pos = start + 1;
        while data.get(type_pos) == Some(&0xFF) {
            type_pos += 1;
        }
        let Some(&type_byte) = data.get(type_pos) else {
            return Err(missing_eoi());
        };
        let marker = Marker::from_u8(type_byte).ok_or_else(|| {
            CostumeError::malformed(format!(
                "invalid marker byte 0x{type_byte:02X} at offset {type_pos}"
            ))
        })?;
        let marker_end = type_pos + 1;

        let (data_offset, end) = match marker {
            Marker::SOI => {
                return Err(CostumeError::malformed(format!(
                    "unexpected SOI marker at offset {start}"
                )))
            }
            Marker::SOS => {
                let header_end = self.segment_end(marker, marker_end)?;
                (marker_end + 2, skip_entropy_coded_data(data, header_end))
            }
            m if m.has_length() => (marker_end + 2, self.segment_end(m, marker_end)?),
            _ => (marker_end, marker_end),
        };

        self.pos = end;
        Ok(Segment {
            marker,
            offset: start,
            length: end - start,
            data_offset,
        })
    }

    /// Reads the big-endian length field at `at`; the length counts its own two bytes.
    fn segment_end(&self, marker: Marker, at: usize) -> Result<usize> {
        let Some(field) = self.data.get(at..at + 2) else {
            return Err(CostumeError::malformed(format!(
                "{marker} segment at offset {} has no length field",
                at - 2
            )));
        };
        let length = u16::from_be_bytes([field[0], field[1]]) as usize;
        if length < 2 {
            return Err(CostumeError::malformed(format!(
                "{marker} segment length {length} is too small"
            )));
        }

        let end = at + length;
        if end > self.data.len() {
            return Err(CostumeError::malformed(format!(
                "{marker} segment of {length} bytes runs past the end of the data"
            )));
        }

        Ok(end)
    }
}

impl Iterator for MarkerScanner<'_> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.state {
            State::Done => return None,
            State::Start => {
                self.state = State::Walking;
                self.start_of_image()
            }
            State::Walking => self.next_segment(),
        };

        match &result {
            Err(_) => self.state = State::Done,
            Ok(segment) if segment.marker == Marker::EOI => self.state = State::Done,
            Ok(_) => {}
        }

        Some(result)
    }
}

/// Returns the offset right after the first EOI marker, which is where
/// appended data begins.
pub fn find_image_end(data: &[u8]) -> Result<usize> {
    for segment in MarkerScanner::new(data) {
        let segment = segment?;
        debug!(
            "{} at offset {} ({} bytes)",
            segment.marker, segment.offset, segment.length
        );

        if segment.marker == Marker::EOI {
            return Ok(segment.end());
        }
    }

    Err(missing_eoi())
}

/// Returns the offset of the first real marker after entropy-coded data.
fn skip_entropy_coded_data(data: &[u8], from: usize) -> usize {
    let mut pos = from;

    while pos + 1 < data.len() {
        if data[pos] == 0xFF {
            match data[pos + 1] {
                // stuffed byte or restart marker
                0x00 | 0xD0..=0xD7 => {
                    pos += 2;
                    continue;
                }
                // fill
                0xFF => {}
                _ => return pos,
            }
        }
        pos += 1;
    }

    data.len()
}

fn missing_eoi() -> CostumeError {
    CostumeError::malformed("no EOI marker before the end of the data")
}
