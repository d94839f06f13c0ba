//! Structural view of JPEG streams.
//!
//! Only the marker layout is looked at, pixel data is never decoded. The main
//! question answered here is where the image ends, so anything appended after
//! it can be found again.

pub mod marker;
pub mod photoshop;
pub mod scanner;

pub use marker::Marker;
pub use photoshop::find_iptc_record;
pub use scanner::{find_image_end, MarkerScanner, Segment};
