//! Demo Views
//!
//! Window contents of the demo binaries.

pub mod languages;
pub mod photos;

pub use languages::LanguagesDemo;
pub use photos::PhotosDemo;
