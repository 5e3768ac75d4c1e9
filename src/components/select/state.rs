//! Select State
//!
//! The popup state machine behind the select control, kept free of GPUI
//! entities so every transition can be exercised directly.
//!
//! ```text
//!            open / toggle                type (searchable)
//!  Closed ─────────────────► OpenIdle ─────────────────► OpenSearching
//!    ▲                          │  ◄──── clear search term ────┘
//!    └── select (close_on_select) / outside click / escape ──┘
//! ```

use gpui::SharedString;

use super::collection::{Collection, CollectionItem, SelectValue};
use super::search::search_filter;
use super::virtualizer::SelectSize;
use crate::constants::MAX_VISIBLE_TAGS;

/// Popup lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopupState {
    #[default]
    Closed,
    OpenIdle,
    OpenSearching,
}

impl PopupState {
    pub fn is_open(self) -> bool {
        !matches!(self, PopupState::Closed)
    }
}

/// Construction-time flags of a select control
#[derive(Debug, Clone, Default)]
pub struct SelectConfig {
    pub multiple: bool,
    pub searchable: bool,
    pub close_on_select: bool,
    pub enable_virtual: bool,
    pub disabled: bool,
    pub disable_clear: bool,
    pub hide_arrow: bool,
    pub size: SelectSize,
    /// Overrides the localized placeholder
    pub placeholder: Option<SharedString>,
    /// Field name; becomes the trigger's element id and tags log lines
    pub name: Option<SharedString>,
}

/// What the trigger shows for the current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueDisplay {
    Placeholder(SharedString),
    Single(SharedString),
    Tags {
        labels: Vec<SharedString>,
        /// Count of selected items beyond the rendered tags
        overflow: Option<usize>,
    },
}

impl ValueDisplay {
    /// Text of the overflow marker, e.g. `+2`
    pub fn overflow_text(count: usize) -> SharedString {
        format!("+{count}").into()
    }
}

/// Ephemeral interaction state of one select control
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    popup: PopupState,
    search_term: String,
    highlighted: Option<usize>,
}

impl SelectState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Getters ====================

    pub fn popup(&self) -> PopupState {
        self.popup
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_open()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Index into the visible rows
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Rows currently offered, after the search term
    pub fn visible_items<'a, V: SelectValue>(
        &self,
        config: &SelectConfig,
        collection: &'a Collection<V>,
    ) -> Vec<&'a CollectionItem<V>> {
        search_filter(collection.items(), &self.search_term, config.searchable)
    }

    // ==================== Transitions ====================

    /// Open the popup. Returns `false` when disabled or already open.
    pub fn open(&mut self, config: &SelectConfig) -> bool {
        if config.disabled || self.popup.is_open() {
            return false;
        }
        self.popup = PopupState::OpenIdle;
        self.highlighted = Some(0);
        true
    }

    /// Close the popup, dropping the search term and highlight
    pub fn close(&mut self) {
        self.popup = PopupState::Closed;
        self.search_term.clear();
        self.highlighted = None;
    }

    /// Open when closed, close when open. Returns whether the popup is now open.
    pub fn toggle(&mut self, config: &SelectConfig) -> bool {
        if self.popup.is_open() {
            self.close();
        } else {
            self.open(config);
        }
        self.popup.is_open()
    }

    /// Update the search term while open
    pub fn set_search_term(&mut self, term: impl Into<String>, config: &SelectConfig) {
        if !config.searchable || !self.popup.is_open() {
            return;
        }
        self.search_term = term.into();
        self.popup = if self.search_term.is_empty() {
            PopupState::OpenIdle
        } else {
            PopupState::OpenSearching
        };
        self.highlighted = Some(0);
    }

    /// New value after picking `item` with `current` selected.
    ///
    /// Returns `None` when nothing may be selected (control or item disabled).
    pub fn select<V: SelectValue>(
        &mut self,
        config: &SelectConfig,
        item: &CollectionItem<V>,
        current: &[V],
    ) -> Option<Vec<V>> {
        if config.disabled || item.disabled {
            return None;
        }

        let next = if config.multiple {
            if current.contains(&item.value) {
                current.iter().filter(|v| **v != item.value).cloned().collect()
            } else {
                let mut next = current.to_vec();
                next.push(item.value.clone());
                next
            }
        } else {
            vec![item.value.clone()]
        };

        if config.close_on_select {
            self.close();
        }
        Some(next)
    }

    /// Value after pressing the clear control
    pub fn clear<V>(&self) -> Vec<V> {
        Vec::new()
    }

    /// Pointer went down outside the popup. Returns whether a blur should be
    /// reported to the caller.
    pub fn interact_outside(&mut self) -> bool {
        let was_open = self.popup.is_open();
        self.close();
        was_open
    }

    // ==================== Keyboard ====================

    /// Move the highlight down, wrapping at the end
    pub fn highlight_next(&mut self, visible_count: usize) {
        if visible_count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(index) if index + 1 < visible_count => index + 1,
            _ => 0,
        });
    }

    /// Move the highlight up, wrapping at the start
    pub fn highlight_prev(&mut self, visible_count: usize) {
        if visible_count == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(index) if index > 0 && index < visible_count => index - 1,
            _ => visible_count - 1,
        });
    }

    /// Point the highlight at a row, e.g. on hover
    pub fn set_highlighted(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    // ==================== Display ====================

    /// What the collapsed trigger shows for `value`
    pub fn display<V: SelectValue>(
        config: &SelectConfig,
        collection: &Collection<V>,
        value: &[V],
        default_placeholder: SharedString,
    ) -> ValueDisplay {
        let selected = collection.selected_items(value);

        match selected.as_slice() {
            [] => ValueDisplay::Placeholder(config.placeholder.clone().unwrap_or(default_placeholder)),
            [only] if !config.multiple => ValueDisplay::Single(only.label.clone()),
            items => ValueDisplay::Tags {
                labels: items
                    .iter()
                    .take(MAX_VISIBLE_TAGS)
                    .map(|item| item.label.clone())
                    .collect(),
                overflow: (items.len() > MAX_VISIBLE_TAGS).then(|| items.len() - MAX_VISIBLE_TAGS),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::select::adapter::{Accessor, OptionAdapter};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Fruit {
        id: u32,
        name: &'static str,
    }

    fn collection() -> Collection<u32> {
        let options = vec![
            Fruit { id: 1, name: "Apple" },
            Fruit { id: 2, name: "Apricot" },
            Fruit { id: 3, name: "Banana" },
            Fruit { id: 4, name: "Cherry" },
            Fruit { id: 5, name: "Date" },
            Fruit { id: 6, name: "Fig" },
        ];
        let adapter = OptionAdapter::new(Accessor::field("name"), Accessor::field("id"));
        Collection::build(&options, None, None, &adapter).expect("build failed")
    }

    fn item(collection: &Collection<u32>, value: u32) -> CollectionItem<u32> {
        collection.get(&value).cloned().expect("unknown value")
    }

    fn multi() -> SelectConfig {
        SelectConfig {
            multiple: true,
            searchable: true,
            ..Default::default()
        }
    }

    #[test]
    fn starts_closed_and_opens_idle() {
        let mut state = SelectState::new();
        assert_eq!(state.popup(), PopupState::Closed);

        assert!(state.open(&SelectConfig::default()));
        assert_eq!(state.popup(), PopupState::OpenIdle);
        assert!(!state.open(&SelectConfig::default()));
    }

    #[test]
    fn disabled_control_stays_closed() {
        let config = SelectConfig {
            disabled: true,
            ..Default::default()
        };
        let mut state = SelectState::new();
        assert!(!state.toggle(&config));
        assert_eq!(state.popup(), PopupState::Closed);
    }

    #[test]
    fn typing_moves_to_searching_and_back() {
        let config = multi();
        let collection = collection();
        let mut state = SelectState::new();
        state.open(&config);

        state.set_search_term("ap", &config);
        assert_eq!(state.popup(), PopupState::OpenSearching);
        let labels: Vec<_> = state
            .visible_items(&config, &collection)
            .iter()
            .map(|item| item.label.to_string())
            .collect();
        assert_eq!(labels, vec!["Apple", "Apricot"]);

        state.set_search_term("", &config);
        assert_eq!(state.popup(), PopupState::OpenIdle);
        assert_eq!(state.visible_items(&config, &collection).len(), 6);
    }

    #[test]
    fn search_ignored_when_not_searchable() {
        let config = SelectConfig::default();
        let mut state = SelectState::new();
        state.open(&config);
        state.set_search_term("ap", &config);

        assert_eq!(state.popup(), PopupState::OpenIdle);
        assert_eq!(state.search_term(), "");
    }

    #[test]
    fn single_select_with_close_on_select() {
        let config = SelectConfig {
            close_on_select: true,
            ..Default::default()
        };
        let collection = collection();
        let mut state = SelectState::new();
        state.open(&config);

        let next = state.select(&config, &item(&collection, 3), &[1]);
        assert_eq!(next, Some(vec![3]));
        assert_eq!(state.popup(), PopupState::Closed);
    }

    #[test]
    fn single_select_stays_open_without_close_on_select() {
        let config = SelectConfig::default();
        let collection = collection();
        let mut state = SelectState::new();
        state.open(&config);

        assert_eq!(state.select(&config, &item(&collection, 2), &[]), Some(vec![2]));
        assert!(state.is_open());
    }

    #[test]
    fn multi_select_appends_then_toggles_off() {
        let config = multi();
        let collection = collection();
        let mut state = SelectState::new();
        state.open(&config);

        let value = state.select(&config, &item(&collection, 4), &[]).expect("selectable");
        let value = state.select(&config, &item(&collection, 1), &value).expect("selectable");
        assert_eq!(value, vec![4, 1]);
        assert!(state.is_open());

        let value = state.select(&config, &item(&collection, 4), &value).expect("selectable");
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn multi_select_closes_when_asked() {
        let config = SelectConfig {
            close_on_select: true,
            ..multi()
        };
        let collection = collection();
        let mut state = SelectState::new();
        state.open(&config);

        state.select(&config, &item(&collection, 1), &[]);
        assert!(!state.is_open());
    }

    #[test]
    fn disabled_item_is_not_selectable() {
        let config = multi();
        let mut state = SelectState::new();
        let disabled = CollectionItem {
            value: 9,
            label: "Kiwi".into(),
            disabled: true,
        };

        assert_eq!(state.select(&config, &disabled, &[1]), None);
    }

    #[test]
    fn clear_always_empties() {
        let state = SelectState::new();
        let cleared: Vec<u32> = state.clear();
        assert!(cleared.is_empty());
    }

    #[test]
    fn outside_interaction_blurs_only_when_open() {
        let config = multi();
        let mut state = SelectState::new();
        assert!(!state.interact_outside());

        state.open(&config);
        assert!(state.interact_outside());
        assert_eq!(state.popup(), PopupState::Closed);
    }

    #[test]
    fn closing_resets_search_term() {
        let config = multi();
        let mut state = SelectState::new();
        state.open(&config);
        state.set_search_term("fig", &config);

        state.close();
        state.open(&config);
        assert_eq!(state.search_term(), "");
        assert_eq!(state.popup(), PopupState::OpenIdle);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut state = SelectState::new();
        state.open(&SelectConfig::default());
        assert_eq!(state.highlighted(), Some(0));

        state.highlight_prev(3);
        assert_eq!(state.highlighted(), Some(2));
        state.highlight_next(3);
        assert_eq!(state.highlighted(), Some(0));
        state.highlight_next(3);
        assert_eq!(state.highlighted(), Some(1));

        state.highlight_next(0);
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn display_placeholder_single_and_tags() {
        let collection = collection();
        let placeholder: SharedString = "Seçin".into();

        let single = SelectConfig::default();
        assert_eq!(
            SelectState::display(&single, &collection, &[], placeholder.clone()),
            ValueDisplay::Placeholder(placeholder.clone())
        );
        assert_eq!(
            SelectState::display(&single, &collection, &[3], placeholder.clone()),
            ValueDisplay::Single("Banana".into())
        );

        let custom = SelectConfig {
            placeholder: Some("Meyvə seçin".into()),
            ..Default::default()
        };
        assert_eq!(
            SelectState::display(&custom, &collection, &[42], placeholder.clone()),
            ValueDisplay::Placeholder("Meyvə seçin".into())
        );

        let one = SelectState::display(&multi(), &collection, &[5], placeholder);
        assert_eq!(
            one,
            ValueDisplay::Tags {
                labels: vec!["Date".into()],
                overflow: None,
            }
        );
    }

    #[test]
    fn display_five_selected_shows_three_tags_and_overflow() {
        let collection = collection();
        let display = SelectState::display(&multi(), &collection, &[1, 2, 3, 4, 5], "x".into());

        match display {
            ValueDisplay::Tags { labels, overflow } => {
                assert_eq!(labels.len(), 3);
                assert_eq!(overflow, Some(2));
                assert_eq!(ValueDisplay::overflow_text(2).to_string(), "+2");
            }
            other => panic!("expected tags, got {other:?}"),
        }
    }
}
