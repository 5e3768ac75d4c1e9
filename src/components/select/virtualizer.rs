//! Row Virtualizer
//!
//! Decides which rows of the option list get materialized. The select view
//! talks to a [`RowVirtualizer`] and never branches on whether windowing is
//! enabled:
//!
//! ```text
//! enable_virtual ──► WindowedRows ──► virtualizer engine, rows near the viewport
//!                └─► AllRows      ──► every row, natural flow layout
//! ```

use gpui::ScrollHandle;
use serde::{Deserialize, Serialize};
use virtualizer::{Align, Virtualizer, VirtualizerOptions};

use crate::constants::{ROW_HEIGHT_LG, ROW_HEIGHT_MD, ROW_HEIGHT_SM};

/// Control size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectSize {
    #[serde(rename = "sm")]
    Small,
    #[default]
    #[serde(rename = "md")]
    Medium,
    #[serde(rename = "lg")]
    Large,
}

impl SelectSize {
    /// Estimated height of one option row, in pixels
    pub fn row_height(self) -> f32 {
        match self {
            SelectSize::Small => ROW_HEIGHT_SM,
            SelectSize::Medium => ROW_HEIGHT_MD,
            SelectSize::Large => ROW_HEIGHT_LG,
        }
    }
}

/// Scroll position and extent of the list container for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Distance scrolled from the top, in pixels (never negative)
    pub scroll_offset: f32,
    /// Visible height of the container, in pixels
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_offset: f32, height: f32) -> Self {
        Self {
            scroll_offset: scroll_offset.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Current scroll position of `handle` over a container of `height`.
    ///
    /// The height is the one the caller lays the container out with in this
    /// frame; the handle's bounds still describe the previous frame.
    pub fn from_scroll_handle(handle: &ScrollHandle, height: f32) -> Self {
        // GPUI reports content displacement, which is negative when scrolled down
        Self::new(-f32::from(handle.offset().y), height)
    }
}

/// One materialized row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualRow {
    /// Index into the visible (search-filtered) items
    pub index: usize,
    /// Offset from the top of the list content, in pixels
    pub start: f32,
    /// Row height, in pixels
    pub size: f32,
    /// Render key, stable for a given index
    pub key: usize,
}

/// Result of one windowing pass
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleWindow {
    /// Height of the whole list content, in pixels
    pub total_size: f32,
    /// Rows to materialize, in index order
    pub rows: Vec<VirtualRow>,
    /// Whether rows must be placed at `start` rather than flowed
    pub positioned: bool,
}

/// Strategy computing which rows to materialize
pub trait RowVirtualizer {
    fn compute_visible_window(
        &self,
        item_count: usize,
        viewport: Viewport,
        row_height: f32,
        overscan: usize,
    ) -> VisibleWindow;
}

/// Materializes only rows inside the viewport plus `overscan` on each side
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedRows;

/// Materializes every row
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRows;

static WINDOWED: WindowedRows = WindowedRows;
static ALL: AllRows = AllRows;

/// Strategy for the `enable_virtual` flag
pub fn virtualizer_for(enable_virtual: bool) -> &'static dyn RowVirtualizer {
    if enable_virtual { &WINDOWED } else { &ALL }
}

impl RowVirtualizer for WindowedRows {
    fn compute_visible_window(
        &self,
        item_count: usize,
        viewport: Viewport,
        row_height: f32,
        overscan: usize,
    ) -> VisibleWindow {
        if item_count == 0 || row_height <= 0.0 {
            return VisibleWindow {
                total_size: 0.0,
                rows: Vec::new(),
                positioned: true,
            };
        }

        let row_px = row_height.round();
        let mut options = VirtualizerOptions::new(item_count, move |_| row_px as _);
        options.overscan = overscan;

        let mut engine = Virtualizer::new(options);
        engine.set_viewport_and_scroll(viewport.height.ceil() as _, 0);
        engine.set_scroll_offset_clamped(viewport.scroll_offset.round() as _);

        let mut rows = Vec::new();
        engine.for_each_virtual_item(|item| {
            rows.push(VirtualRow {
                index: item.index,
                start: item.start as f32,
                size: item.size as f32,
                key: item.index,
            })
        });

        VisibleWindow {
            total_size: engine.total_size() as f32,
            rows,
            positioned: true,
        }
    }
}

impl RowVirtualizer for AllRows {
    fn compute_visible_window(
        &self,
        item_count: usize,
        _viewport: Viewport,
        row_height: f32,
        _overscan: usize,
    ) -> VisibleWindow {
        VisibleWindow {
            total_size: item_count as f32 * row_height,
            rows: (0..item_count)
                .map(|index| VirtualRow {
                    index,
                    start: index as f32 * row_height,
                    size: row_height,
                    key: index,
                })
                .collect(),
            positioned: false,
        }
    }
}

/// Scroll offset that brings row `index` fully into view, or `None` when it
/// already is.
pub fn scroll_offset_to_reveal(
    item_count: usize,
    index: usize,
    row_height: f32,
    viewport: Viewport,
) -> Option<f32> {
    if index >= item_count || row_height <= 0.0 {
        return None;
    }

    let row_px = row_height.round();
    let mut engine = Virtualizer::new(VirtualizerOptions::new(item_count, move |_| row_px as _));
    engine.set_viewport_and_scroll(viewport.height.ceil() as _, 0);
    let top = engine.scroll_to_index_offset(index, Align::Start) as f32;
    let bottom = engine.scroll_to_index_offset(index, Align::End) as f32;

    if viewport.scroll_offset > top {
        Some(top)
    } else if viewport.scroll_offset < bottom {
        Some(bottom)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_LIST_HEIGHT, OVERSCAN};

    fn indices(window: &VisibleWindow) -> Vec<usize> {
        window.rows.iter().map(|r| r.index).collect()
    }

    #[test]
    fn row_heights_by_size() {
        assert_eq!(SelectSize::Small.row_height(), 28.0);
        assert_eq!(SelectSize::Medium.row_height(), 32.0);
        assert_eq!(SelectSize::Large.row_height(), 40.0);
        assert_eq!(SelectSize::default(), SelectSize::Medium);
    }

    #[test]
    fn windowed_top_of_list() {
        let viewport = Viewport::new(0.0, MAX_LIST_HEIGHT);
        let window = WindowedRows.compute_visible_window(1000, viewport, 32.0, OVERSCAN);

        assert_eq!(window.total_size, 32_000.0);
        assert!(window.positioned);
        // 300 / 32 rounds up to 10 visible rows, plus 5 overscan below
        assert_eq!(indices(&window), (0..15).collect::<Vec<_>>());
        assert_eq!(window.rows[3].start, 96.0);
    }

    #[test]
    fn windowed_middle_is_bounded() {
        let viewport = Viewport::new(16_000.0, MAX_LIST_HEIGHT);
        let window = WindowedRows.compute_visible_window(1000, viewport, 32.0, OVERSCAN);

        let visible = (MAX_LIST_HEIGHT / 32.0).ceil() as usize + 1;
        assert!(window.rows.len() <= visible + 2 * OVERSCAN);
        assert_eq!(window.rows.first().map(|r| r.index), Some(495));
        assert_eq!(window.rows.last().map(|r| r.index), Some(514));
        assert_eq!(window.rows[0].start, 495.0 * 32.0);
    }

    #[test]
    fn windowed_clamps_overscroll() {
        let viewport = Viewport::new(1_000_000.0, MAX_LIST_HEIGHT);
        let window = WindowedRows.compute_visible_window(1000, viewport, 32.0, OVERSCAN);

        assert_eq!(window.rows.last().map(|r| r.index), Some(999));
        assert!(window.rows.len() <= 20);
    }

    #[test]
    fn windowed_short_list_renders_all() {
        let viewport = Viewport::new(0.0, MAX_LIST_HEIGHT);
        let window = WindowedRows.compute_visible_window(4, viewport, 40.0, OVERSCAN);

        assert_eq!(indices(&window), vec![0, 1, 2, 3]);
        assert_eq!(window.total_size, 160.0);
    }

    #[test]
    fn windowed_empty_list() {
        let window = WindowedRows.compute_visible_window(0, Viewport::default(), 32.0, OVERSCAN);
        assert!(window.rows.is_empty());
        assert_eq!(window.total_size, 0.0);
    }

    #[test]
    fn all_rows_renders_everything_unpositioned() {
        let viewport = Viewport::new(16_000.0, MAX_LIST_HEIGHT);
        let window = AllRows.compute_visible_window(1000, viewport, 32.0, OVERSCAN);

        assert_eq!(window.rows.len(), 1000);
        assert!(!window.positioned);
        assert_eq!(window.total_size, 32_000.0);
    }

    #[test]
    fn virtualizer_for_selects_strategy() {
        let viewport = Viewport::new(0.0, MAX_LIST_HEIGHT);
        assert!(virtualizer_for(true).compute_visible_window(100, viewport, 32.0, 5).positioned);
        assert!(!virtualizer_for(false).compute_visible_window(100, viewport, 32.0, 5).positioned);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let viewport = Viewport::new(320.0, 300.0);
        assert_eq!(scroll_offset_to_reveal(1000, 12, 32.0, viewport), None);
        assert_eq!(scroll_offset_to_reveal(1000, 2, 32.0, viewport), Some(64.0));
        assert_eq!(scroll_offset_to_reveal(1000, 20, 32.0, viewport), Some(21.0 * 32.0 - 300.0));
        assert_eq!(scroll_offset_to_reveal(10, 10, 32.0, viewport), None);
    }

    #[test]
    fn widened_list_is_covered_to_the_bottom() {
        // Search narrowed the list to two rows, then the term was cleared:
        // the container grows back to its cap in the same frame.
        let narrowed = Viewport::new(0.0, 2.0 * 32.0);
        let window = WindowedRows.compute_visible_window(2, narrowed, 32.0, OVERSCAN);
        assert_eq!(indices(&window), vec![0, 1]);

        let list_height = (1000.0 * 32.0f32).min(MAX_LIST_HEIGHT);
        let widened = Viewport::new(narrowed.scroll_offset, list_height);
        let window = WindowedRows.compute_visible_window(1000, widened, 32.0, OVERSCAN);
        let covered = window.rows.last().map(|r| r.start + r.size).unwrap_or_default();
        assert!(covered >= list_height, "rows end at {covered}px of {list_height}px");
    }

    #[test]
    fn negative_offset_is_clamped() {
        let viewport = Viewport::new(-50.0, MAX_LIST_HEIGHT);
        assert_eq!(viewport.scroll_offset, 0.0);
        let window = WindowedRows.compute_visible_window(1000, viewport, 32.0, OVERSCAN);
        assert_eq!(window.rows.first().map(|r| r.index), Some(0));
    }

    #[test]
    fn size_parses_from_short_names() {
        #[derive(Deserialize)]
        struct Holder {
            size: SelectSize,
        }
        let holder: Holder = toml::from_str("size = \"lg\"").expect("parse failed");
        assert_eq!(holder.size, SelectSize::Large);
    }
}
