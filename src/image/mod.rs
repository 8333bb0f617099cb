//! Local image handling: format sniffing, RGBA conversion, and resizing.
//!
//! Decoding and encoding are CPU bound, so the async entry points hand the
//! work to tokio's blocking pool and await it before returning.

mod convert;
mod resize;
mod types;

pub use convert::{convert_to_rgba, to_rgba};
pub use resize::{resize_exact, resize_in_place};
pub use types::{read_dimensions, Dimensions, ImageFormat};
