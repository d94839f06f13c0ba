//! Recognises the Photoshop image resource block some costume files carry in
//! APP13, holding the costume as an IPTC record.
//!
//! Layout: `Photoshop 3.0\0`, then resources of `8BIM`, u16 id, an even-padded
//! Pascal name, a u32 size and the even-padded data. IPTC lives in resource
//! `0x0404` as a run of datasets, each `1C`, record, tag, u16 size, data.

use byteorder::{BigEndian, ByteOrder};

use super::marker::Marker;
use super::scanner::MarkerScanner;
use crate::result::Result;

const SIGNATURE: &[u8] = b"Photoshop 3.0\0";
const RESOURCE_SIGNATURE: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;
const DATASET_TAG: u8 = 0x1C;

/// Counts the IPTC datasets in the first APP13 segment that carries them.
pub fn find_iptc_record(jpeg: &[u8]) -> Result<Option<usize>> {
    for segment in MarkerScanner::new(jpeg) {
        let segment = segment?;
        if segment.marker == Marker::APP(13) {
            if let Some(record) = iptc_record(segment.data(jpeg)) {
                return Ok(Some(count_datasets(record)));
            }
        }
    }

    Ok(None)
}

/// The data of the IPTC resource inside an APP13 payload.
pub fn iptc_record(app13: &[u8]) -> Option<&[u8]> {
    let mut rest = app13.strip_prefix(SIGNATURE)?;

    while let Some(body) = rest.strip_prefix(RESOURCE_SIGNATURE) {
        let id = BigEndian::read_u16(body.get(..2)?);
        let name_len = *body.get(2)? as usize;
        let size_at = 2 + padded(1 + name_len);
        let size = BigEndian::read_u32(body.get(size_at..size_at + 4)?) as usize;
        let data_at = size_at + 4;
        let data = body.get(data_at..data_at + size)?;

        if id == IPTC_RESOURCE_ID {
            return Some(data);
        }
        rest = body.get(data_at + padded(size)..)?;
    }

    None
}

fn count_datasets(record: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;

    // the record may end in a zero pad byte
    while record.get(pos) == Some(&DATASET_TAG) {
        let Some(size) = record.get(pos + 3..pos + 5) else {
            break;
        };
        pos += 5 + BigEndian::read_u16(size) as usize;
        if pos > record.len() {
            break;
        }
        count += 1;
    }

    count
}

fn padded(len: usize) -> usize {
    len + len % 2
}
