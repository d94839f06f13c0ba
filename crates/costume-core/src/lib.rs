//! # Costume Core
//!
//! Hides costume data behind the End-Of-Image marker of a JPEG file and gets
//! it back out. The picture stays viewable, viewers stop reading at EOI.
//!
//! - [`jpeg`] walks the marker segments to find where the image ends
//! - [`container`] appends and reads the length-prefixed footer, and rewrites
//!   files safely (backup first, then temp file plus rename)
//! - [`api`] offers builder style entry points on top
//!
//! # Usage Examples
//!
//! ## Pack data into an image
//!
//! ```rust,no_run
//! costume_core::api::pack::prepare()
//!     .with_image("hero.jpg")            // rewritten in place, hero.jpg.bak keeps the original
//!     .with_data("hero.dat")             // the costume data to embed
//!     .execute()
//!     .expect("Failed to pack costume data");
//! ```
//!
//! ## Unpack data from an image
//!
//! ```rust,no_run
//! costume_core::api::unpack::prepare()
//!     .from_image("hero.jpg")
//!     .into_data_file("hero.dat")
//!     .execute()
//!     .expect("Failed to unpack costume data");
//! ```
//!
//! ## Work on buffers
//!
//! ```rust
//! let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
//! let packed = costume_core::embed(&jpeg, b"hello").unwrap();
//!
//! assert_eq!(&packed[4..8], &[0, 0, 0, 5]);
//! assert_eq!(costume_core::extract(&packed).unwrap(), b"hello");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod container;
pub mod error;
pub mod jpeg;
pub mod result;

pub use crate::commands::Mode;
pub use crate::container::{
    embed, extract, inspect, pack, pack_with_options, unpack, BackupPolicy, Container,
    ContainerInfo, PackOptions, PayloadFooter,
};
pub use crate::error::CostumeError;
pub use crate::jpeg::{find_image_end, find_iptc_record, Marker, MarkerScanner, Segment};
pub use crate::result::Result;
