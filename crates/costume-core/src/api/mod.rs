//! Builder style entry points, one module per operation.
//!
//! ```rust,no_run
//! costume_core::api::pack::prepare()
//!     .with_image("hero.jpg")
//!     .with_data("hero.dat")
//!     .execute()
//!     .expect("Failed to pack costume data");
//! ```

pub mod inspect;
pub mod pack;
pub mod unpack;

mod shared;

pub use shared::companion_data_path;
