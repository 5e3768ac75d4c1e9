//! Components - Reusable UI Components
//!
//! UI components that don't depend on services or do I/O.

pub mod select;
