//! State Management Layer
//!
//! Application-wide state registered as GPUI globals.

mod settings;

pub use settings::*;
