//! Select Component
//!
//! Searchable single/multi select with optional row virtualization.
//!
//! Pure pieces (accessors, collection, search, windowing, state machine) live
//! in their own modules so they can be tested without a window.

mod adapter;
mod collection;
mod search;
mod state;
mod trigger;
mod view;
mod virtualizer;

pub use adapter::{Accessor, OptionAdapter};
pub use collection::{Collection, CollectionItem, OptionFilter, OptionPredicate, SelectValue};
pub use search::search_filter;
pub use state::{PopupState, SelectConfig, SelectState, ValueDisplay};
pub use trigger::SelectTrigger;
pub use view::{Select, SelectEvent, SelectProps};
pub use virtualizer::{
    AllRows, RowVirtualizer, SelectSize, Viewport, VirtualRow, VisibleWindow,
    WindowedRows, scroll_offset_to_reveal, virtualizer_for,
};
