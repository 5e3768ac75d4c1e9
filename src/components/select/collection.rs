//! Collection Builder
//!
//! Turns raw options into the ordered, value-keyed collection the select
//! control renders from and resolves selections against.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use ahash::RandomState;
use gpui::SharedString;
use hashlink::LinkedHashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::adapter::OptionAdapter;
use crate::error::Result;

/// Bounds required of a selectable value
pub trait SelectValue: Clone + Eq + Hash + Debug + DeserializeOwned + 'static {}

impl<V> SelectValue for V where V: Clone + Eq + Hash + Debug + DeserializeOwned + 'static {}

/// Predicate deciding whether an option is offered at all.
///
/// Receives the option, its index and the full unfiltered list.
pub type OptionFilter<T> = Arc<dyn Fn(&T, usize, &[T]) -> bool + Send + Sync>;

/// Predicate over a single option
pub type OptionPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Display-ready projection of one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem<V> {
    pub value: V,
    pub label: SharedString,
    /// Rendered but not selectable
    pub disabled: bool,
}

/// Ordered lookup from value to item
pub struct Collection<V> {
    items: LinkedHashMap<V, CollectionItem<V>, RandomState>,
}

impl<V: Clone + Eq + Hash> Clone for Collection<V> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<V: SelectValue> Collection<V> {
    /// An empty collection
    pub fn empty() -> Self {
        Self {
            items: LinkedHashMap::with_hasher(RandomState::new()),
        }
    }

    /// Build a collection from `options`.
    ///
    /// The filter runs first over the whole list; survivors are projected
    /// through the adapter in source order. When two options share a value
    /// the first one is kept.
    pub fn build<T: Serialize>(
        options: &[T],
        filter: Option<&OptionFilter<T>>,
        disable_option: Option<&OptionPredicate<T>>,
        adapter: &OptionAdapter<T, V>,
    ) -> Result<Self> {
        let mut collection = Self::empty();

        for (index, option) in options.iter().enumerate() {
            if let Some(filter) = filter {
                if !filter(option, index, options) {
                    continue;
                }
            }

            let (value, label) = adapter.project(index, option)?;
            if collection.items.contains_key(&value) {
                tracing::warn!(index, value = ?value, "Duplicate option value, keeping the first");
                continue;
            }

            let disabled = disable_option.is_some_and(|predicate| predicate(option));
            collection.items.insert(
                value.clone(),
                CollectionItem {
                    value,
                    label,
                    disabled,
                },
            );
        }

        tracing::trace!(total = options.len(), kept = collection.len(), "Built option collection");
        Ok(collection)
    }

    /// Items in source order
    pub fn items(&self) -> impl Iterator<Item = &CollectionItem<V>> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, value: &V) -> Option<&CollectionItem<V>> {
        self.items.get(value)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.items.contains_key(value)
    }

    /// Label of the item holding `value`
    pub fn stringify(&self, value: &V) -> Option<SharedString> {
        self.get(value).map(|item| item.label.clone())
    }

    /// Items for `values`, in the order of `values`. Unknown values are skipped.
    pub fn selected_items(&self, values: &[V]) -> Vec<&CollectionItem<V>> {
        values.iter().filter_map(|value| self.get(value)).collect()
    }
}

impl<V: SelectValue> Default for Collection<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V: Debug> Debug for Collection<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.values()).finish()
    }
}
