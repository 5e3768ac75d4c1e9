//! Services Layer
//!
//! Background I/O used by the demos. Services never touch GPUI entities;
//! callers await them from a GPUI task and apply the result themselves.

pub mod photos;
mod runtime;

pub use photos::{Photo, fetch_photos};
pub use runtime::*;
