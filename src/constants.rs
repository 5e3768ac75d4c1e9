//! UI Constants
//!
//! Centralized sizing constants for the select control and the demo windows.

/// Estimated row height per control size, in pixels
pub const ROW_HEIGHT_SM: f32 = 28.0;
pub const ROW_HEIGHT_MD: f32 = 32.0;
pub const ROW_HEIGHT_LG: f32 = 40.0;

/// Extra rows rendered beyond the viewport in each direction
pub const OVERSCAN: usize = 5;

/// Maximum height of the scrollable option list
pub const MAX_LIST_HEIGHT: f32 = 300.0;

/// Number of selected labels rendered as tags before the `+N` marker
pub const MAX_VISIBLE_TAGS: usize = 3;

/// Minimum trigger width
pub const TRIGGER_MIN_WIDTH: f32 = 150.0;

/// Default demo window dimensions
pub const DEFAULT_WINDOW_WIDTH: f32 = 720.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 560.0;

/// Public photo list used by the photos demo
pub const DEFAULT_PHOTOS_URL: &str = "https://jsonplaceholder.typicode.com/photos";
