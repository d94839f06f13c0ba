//! JPEG marker types as they appear after the 0xFF prefix (ITU T.81 Table B.1).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Marker {
    /// Start of Frame, parameter is the SOF type (0-15)
    SOF(u8),
    JPG,
    DHT,
    DAC,
    /// Restart marker (0-7)
    RST(u8),
    SOI,
    EOI,
    SOS,
    DQT,
    DNL,
    DRI,
    DHP,
    EXP,
    /// Application segment (0-15)
    APP(u8),
    /// JPEG extension (0-13)
    JPGn(u8),
    COM,
    TEM,
    /// Reserved, carries the raw type byte
    RES(u8),
}

impl Marker {
    /// Returns None for 0x00 (stuffed byte) and 0xFF (fill byte).
    pub fn from_u8(n: u8) -> Option<Marker> {
        use Marker::*;
        match n {
            0x00 | 0xFF => None,
            0x01 => Some(TEM),
            0x02..=0xBF => Some(RES(n)),
            0xC4 => Some(DHT),
            0xC8 => Some(JPG),
            0xCC => Some(DAC),
            0xC0..=0xCF => Some(SOF(n - 0xC0)),
            0xD0..=0xD7 => Some(RST(n - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xDB => Some(DQT),
            0xDC => Some(DNL),
            0xDD => Some(DRI),
            0xDE => Some(DHP),
            0xDF => Some(EXP),
            0xE0..=0xEF => Some(APP(n - 0xE0)),
            0xF0..=0xFD => Some(JPGn(n - 0xF0)),
            0xFE => Some(COM),
        }
    }

    /// Markers that stand alone, without a length field after them.
    pub fn has_length(self) -> bool {
        !matches!(
            self,
            Marker::RST(..) | Marker::SOI | Marker::EOI | Marker::TEM
        )
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::SOF(n) => write!(f, "SOF{n}"),
            Marker::RST(n) => write!(f, "RST{n}"),
            Marker::APP(n) => write!(f, "APP{n}"),
            Marker::JPGn(n) => write!(f, "JPG{n}"),
            Marker::RES(n) => write!(f, "RES(0x{n:02X})"),
            other => write!(f, "{other:?}"),
        }
    }
}
