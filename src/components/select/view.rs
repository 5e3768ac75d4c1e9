//! Select Control
//!
//! A controlled select entity. The caller owns the value: the control only
//! reports the value it would like via [`SelectEvent::Change`] and renders
//! whatever was last pushed through [`Select::set_value`].
//!
//! ```text
//! parent ──set_value──► Select ──SelectEvent::Change(next)──► parent
//! ```

use gpui::{
    AnyElement, App, Bounds, ClickEvent, Context, ElementId, Entity, EventEmitter, FocusHandle,
    Focusable, InteractiveElement, IntoElement, KeyDownEvent, MouseDownEvent, MouseMoveEvent,
    ParentElement, Pixels, Render, ScrollHandle, ScrollWheelEvent, SharedString, Stateful,
    StatefulInteractiveElement, Styled, Subscription, Window, anchored, canvas, deferred, div,
    point, prelude::*, px,
};
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable, Size,
    input::{Input, InputEvent, InputState},
    h_flex, v_flex,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use super::adapter::{Accessor, OptionAdapter};
use super::collection::{Collection, CollectionItem, OptionFilter, OptionPredicate, SelectValue};
use super::state::{SelectConfig, SelectState};
use super::trigger::SelectTrigger;
use super::virtualizer::{
    SelectSize, Viewport, VisibleWindow, scroll_offset_to_reveal, virtualizer_for,
};
use crate::constants::{MAX_LIST_HEIGHT, OVERSCAN, TRIGGER_MIN_WIDTH};
use crate::error::Result;
use crate::states::tr;

/// Notifications sent to the owner of a select
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEvent<V> {
    /// The user asked for a new value
    Change(Vec<V>),
    /// The popup was dismissed by interacting outside of it
    Blur,
}

/// Everything needed to construct a [`Select`]
pub struct SelectProps<T, V> {
    options: Vec<T>,
    value: Vec<V>,
    adapter: OptionAdapter<T, V>,
    filter: Option<OptionFilter<T>>,
    disable_option: Option<OptionPredicate<T>>,
    config: SelectConfig,
}

impl<T, V> SelectProps<T, V> {
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            value: Vec::new(),
            adapter: OptionAdapter::default(),
            filter: None,
            disable_option: None,
            config: SelectConfig::default(),
        }
    }

    /// Initial value
    pub fn value(mut self, value: Vec<V>) -> Self {
        self.value = value;
        self
    }

    pub fn get_label(mut self, label: Accessor<T, String>) -> Self {
        self.adapter = self.adapter.with_label(label);
        self
    }

    pub fn get_value(mut self, value: Accessor<T, V>) -> Self {
        self.adapter = self.adapter.with_value(value);
        self
    }

    /// Only offer options for which `filter(option, index, all)` holds
    pub fn filter(mut self, filter: impl Fn(&T, usize, &[T]) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Render options for which `predicate` holds as not selectable
    pub fn disable_option(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.disable_option = Some(Arc::new(predicate));
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.config.searchable = searchable;
        self
    }

    pub fn close_on_select(mut self, close_on_select: bool) -> Self {
        self.config.close_on_select = close_on_select;
        self
    }

    pub fn enable_virtual(mut self, enable_virtual: bool) -> Self {
        self.config.enable_virtual = enable_virtual;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn disable_clear(mut self, disable_clear: bool) -> Self {
        self.config.disable_clear = disable_clear;
        self
    }

    pub fn hide_arrow(mut self, hide_arrow: bool) -> Self {
        self.config.hide_arrow = hide_arrow;
        self
    }

    pub fn size(mut self, size: SelectSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    pub fn name(mut self, name: impl Into<SharedString>) -> Self {
        self.config.name = Some(name.into());
        self
    }
}

/// Searchable, optionally virtualized single/multi select
pub struct Select<T, V> {
    id: ElementId,
    options: Vec<T>,
    adapter: OptionAdapter<T, V>,
    filter: Option<OptionFilter<T>>,
    disable_option: Option<OptionPredicate<T>>,
    config: SelectConfig,
    /// Rebuilt wholesale whenever options, filter or accessors change
    collection: Collection<V>,
    /// Last value pushed by the owner
    value: Vec<V>,
    state: SelectState,
    search_input: Option<Entity<InputState>>,
    focus_handle: FocusHandle,
    scroll_handle: ScrollHandle,
    trigger_bounds: Bounds<Pixels>,
    _subscriptions: Vec<Subscription>,
}

impl<T: Serialize + 'static, V: SelectValue> EventEmitter<SelectEvent<V>> for Select<T, V> {}

impl<T: Serialize + 'static, V: SelectValue> Select<T, V> {
    /// Create a new select
    pub fn new(props: SelectProps<T, V>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let SelectProps {
            options,
            value,
            adapter,
            filter,
            disable_option,
            config,
        } = props;

        let collection =
            match Collection::build(&options, filter.as_ref(), disable_option.as_ref(), &adapter) {
                Ok(collection) => collection,
                Err(e) => {
                    error!(error = %e, name = ?config.name, "Failed to build select options");
                    Collection::empty()
                }
            };

        let mut subscriptions = Vec::new();
        let search_input = if config.searchable {
            let placeholder = tr(cx, "select-search-placeholder");
            let input = cx.new(|cx| InputState::new(window, cx).placeholder(placeholder));

            // Search term follows the input while the popup is open
            subscriptions.push(cx.subscribe(&input, |this, input, event, cx| {
                if matches!(event, InputEvent::Change) {
                    let term = input.read(cx).value().to_string();
                    this.state.set_search_term(term, &this.config);
                    this.scroll_handle.set_offset(point(px(0.), px(0.)));
                    cx.notify();
                }
            }));
            Some(input)
        } else {
            None
        };

        let id = match &config.name {
            Some(name) => ElementId::Name(name.clone()),
            None => ElementId::from(("select", cx.entity_id().as_u64() as usize)),
        };

        Self {
            id,
            options,
            adapter,
            filter,
            disable_option,
            config,
            collection,
            value,
            state: SelectState::new(),
            search_input,
            focus_handle: cx.focus_handle(),
            scroll_handle: ScrollHandle::new(),
            trigger_bounds: Bounds::default(),
            _subscriptions: subscriptions,
        }
    }

    // ==================== Getters ====================

    /// The value last pushed by the owner
    pub fn value(&self) -> &[V] {
        &self.value
    }

    pub fn collection(&self) -> &Collection<V> {
        &self.collection
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    // ==================== Setters ====================

    /// Push the controlled value
    pub fn set_value(&mut self, value: Vec<V>, cx: &mut Context<Self>) {
        if self.value != value {
            self.value = value;
            cx.notify();
        }
    }

    /// Replace the options. On error the previous options stay in place.
    pub fn set_options(&mut self, options: Vec<T>, cx: &mut Context<Self>) -> Result<()> {
        self.collection = Collection::build(
            &options,
            self.filter.as_ref(),
            self.disable_option.as_ref(),
            &self.adapter,
        )?;
        self.options = options;
        self.after_rebuild(cx);
        Ok(())
    }

    /// Replace the filter predicate. On error the previous filter stays in place.
    pub fn set_filter(&mut self, filter: Option<OptionFilter<T>>, cx: &mut Context<Self>) -> Result<()> {
        self.collection = Collection::build(
            &self.options,
            filter.as_ref(),
            self.disable_option.as_ref(),
            &self.adapter,
        )?;
        self.filter = filter;
        self.after_rebuild(cx);
        Ok(())
    }

    pub fn set_size(&mut self, size: SelectSize, cx: &mut Context<Self>) {
        self.config.size = size;
        cx.notify();
    }

    /// Switch between windowed and plain rows
    pub fn set_enable_virtual(&mut self, enable_virtual: bool, cx: &mut Context<Self>) {
        self.config.enable_virtual = enable_virtual;
        cx.notify();
    }

    pub fn set_disabled(&mut self, disabled: bool, window: &mut Window, cx: &mut Context<Self>) {
        self.config.disabled = disabled;
        if disabled && self.state.is_open() {
            self.close(window, cx);
        }
        cx.notify();
    }

    fn after_rebuild(&mut self, cx: &mut Context<Self>) {
        if self.state.is_open() {
            self.state.set_highlighted(Some(0));
        }
        cx.notify();
    }

    // ==================== Transitions ====================

    fn open(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if !self.state.open(&self.config) {
            return;
        }
        debug!(id = ?self.id, name = ?self.config.name, "Select opened");
        self.scroll_handle.set_offset(point(px(0.), px(0.)));

        let focus = match &self.search_input {
            Some(input) => input.read(cx).focus_handle(cx),
            None => self.focus_handle.clone(),
        };
        window.focus(&focus);
        cx.notify();
    }

    fn close(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.state.close();
        self.after_close(window, cx);
    }

    /// Sync the search input with a state that just closed
    fn after_close(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        debug!(id = ?self.id, name = ?self.config.name, "Select closed");
        if let Some(input) = &self.search_input {
            input.update(cx, |state, cx| state.set_value("", window, cx));
        }
        cx.notify();
    }

    fn toggle(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.state.is_open() {
            self.close(window, cx);
        } else {
            self.open(window, cx);
        }
    }

    fn select_item(&mut self, item: &CollectionItem<V>, window: &mut Window, cx: &mut Context<Self>) {
        let was_open = self.state.is_open();
        let Some(next) = self.state.select(&self.config, item, &self.value) else {
            return;
        };

        debug!(value = ?item.value, count = next.len(), "Select changed");
        cx.emit(SelectEvent::Change(next));
        if was_open && !self.state.is_open() {
            self.after_close(window, cx);
        }
    }

    fn clear(&mut self, cx: &mut Context<Self>) {
        let cleared: Vec<V> = self.state.clear();
        cx.emit(SelectEvent::Change(cleared));
    }

    fn interact_outside(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.state.interact_outside() {
            self.after_close(window, cx);
            cx.emit(SelectEvent::<V>::Blur);
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let visible_count = self.state.visible_items(&self.config, &self.collection).len();

        match event.keystroke.key.as_str() {
            "down" => self.state.highlight_next(visible_count),
            "up" => self.state.highlight_prev(visible_count),
            "enter" => {
                let highlighted = self.state.highlighted().and_then(|index| {
                    self.state
                        .visible_items(&self.config, &self.collection)
                        .get(index)
                        .map(|item| (*item).clone())
                });
                if let Some(item) = highlighted {
                    self.select_item(&item, window, cx);
                }
            }
            "escape" => self.close(window, cx),
            _ => return,
        }

        self.reveal_highlighted();
        cx.stop_propagation();
        cx.notify();
    }

    fn reveal_highlighted(&self) {
        let Some(index) = self.state.highlighted() else {
            return;
        };
        let item_count = self.state.visible_items(&self.config, &self.collection).len();
        let viewport = Viewport::from_scroll_handle(&self.scroll_handle, self.list_height(item_count));
        if let Some(offset) =
            scroll_offset_to_reveal(item_count, index, self.config.size.row_height(), viewport)
        {
            self.scroll_handle.set_offset(point(px(0.), px(-offset)));
        }
    }

    /// Height the list container is laid out with for `item_count` rows
    fn list_height(&self, item_count: usize) -> f32 {
        (item_count as f32 * self.config.size.row_height()).min(MAX_LIST_HEIGHT)
    }

    /// Rows to materialize for `item_count` visible items in this frame
    fn list_window(&self, item_count: usize) -> VisibleWindow {
        let viewport = Viewport::from_scroll_handle(&self.scroll_handle, self.list_height(item_count));
        virtualizer_for(self.config.enable_virtual).compute_visible_window(
            item_count,
            viewport,
            self.config.size.row_height(),
            OVERSCAN,
        )
    }

    // ==================== Rendering ====================

    fn render_row(
        &self,
        index: usize,
        item: &CollectionItem<V>,
        selected: bool,
        highlighted: bool,
        cx: &Context<Self>,
    ) -> Stateful<gpui::Div> {
        let row_height = self.config.size.row_height();
        let highlight_bg = cx.theme().accent;
        let check_color = cx.theme().primary;
        let clicked = item.clone();

        h_flex()
            .id(("select-item", index))
            .w_full()
            .h(px(row_height))
            .flex_shrink_0()
            .px_2()
            .gap_2()
            .items_center()
            .justify_between()
            .rounded_sm()
            .when(highlighted, |this| this.bg(highlight_bg))
            .map(|this| {
                if item.disabled {
                    this.opacity(0.5).cursor_not_allowed()
                } else {
                    this.cursor_pointer()
                        .on_mouse_move(cx.listener(move |this, _: &MouseMoveEvent, _, cx| {
                            if this.state.highlighted() != Some(index) {
                                this.state.set_highlighted(Some(index));
                                cx.notify();
                            }
                        }))
                        .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                            this.select_item(&clicked, window, cx);
                        }))
                }
            })
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .whitespace_nowrap()
                    .text_ellipsis()
                    .child(item.label.clone()),
            )
            .when(selected, |this| {
                this.child(Icon::new(IconName::Check).size_4().text_color(check_color))
            })
    }

    fn render_list(&self, visible: &[&CollectionItem<V>], cx: &Context<Self>) -> AnyElement {
        if visible.is_empty() {
            return div()
                .p_2()
                .flex()
                .justify_center()
                .text_color(cx.theme().muted_foreground)
                .child(tr(cx, "select-empty"))
                .into_any_element();
        }

        let list_height = self.list_height(visible.len());
        let rows_window = self.list_window(visible.len());

        let highlighted = self.state.highlighted();
        let rows = rows_window.rows.iter().filter_map(|row| {
            let item = visible.get(row.index)?;
            let selected = self.value.contains(&item.value);
            let element = self.render_row(row.index, item, selected, highlighted == Some(row.index), cx);
            Some(if rows_window.positioned {
                element.absolute().top(px(row.start)).left_0().right_0()
            } else {
                element
            })
        });

        let content = if rows_window.positioned {
            div().relative().w_full().h(px(rows_window.total_size)).children(rows)
        } else {
            v_flex().w_full().children(rows)
        };

        div()
            .id("select-list")
            .w_full()
            .h(px(list_height))
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .on_scroll_wheel(cx.listener(|_, _: &ScrollWheelEvent, _, cx| cx.notify()))
            .child(content)
            .into_any_element()
    }

    fn render_popup(&self, cx: &Context<Self>) -> impl IntoElement {
        let visible = self.state.visible_items(&self.config, &self.collection);
        let trigger_bounds = self.trigger_bounds;
        let input_size = match self.config.size {
            SelectSize::Small => Size::Small,
            SelectSize::Medium => Size::Medium,
            SelectSize::Large => Size::Large,
        };

        v_flex()
            .id("select-popup")
            .track_focus(&self.focus_handle)
            .occlude()
            .mt_1()
            .w(trigger_bounds.size.width)
            .min_w(px(TRIGGER_MIN_WIDTH))
            .p_1()
            .gap_1()
            .bg(cx.theme().background)
            .border_1()
            .border_color(cx.theme().border)
            .rounded_md()
            .shadow_md()
            .capture_key_down(cx.listener(Self::on_key_down))
            .on_mouse_down_out(cx.listener(move |this, event: &MouseDownEvent, window, cx| {
                // The trigger toggles on its own
                if trigger_bounds.contains(&event.position) {
                    return;
                }
                this.interact_outside(window, cx);
            }))
            .when_some(self.search_input.as_ref(), |this, input| {
                this.child(Input::new(input).with_size(input_size).cleanable(true))
            })
            .child(self.render_list(&visible, cx))
    }
}

impl<T: Serialize + 'static, V: SelectValue> Focusable for Select<T, V> {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl<T: Serialize + 'static, V: SelectValue> Render for Select<T, V> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let display = SelectState::display(
            &self.config,
            &self.collection,
            &self.value,
            tr(cx, "select-placeholder"),
        );

        let trigger = SelectTrigger::new(self.id.clone(), display)
            .size(self.config.size)
            .open(self.state.is_open())
            .disabled(self.config.disabled)
            .clearable(!self.config.disable_clear && !self.value.is_empty())
            .arrow(!self.config.hide_arrow)
            .on_toggle(cx.listener(|this, _: &ClickEvent, window, cx| this.toggle(window, cx)))
            .on_clear(cx.listener(|this, _: &ClickEvent, _, cx| this.clear(cx)));

        // Popup width follows the trigger
        let entity = cx.entity();
        let bounds_tracker = canvas(
            move |bounds, _, cx| entity.update(cx, |this, _| this.trigger_bounds = bounds),
            |_, _, _, _| {},
        )
        .absolute()
        .size_full();

        let popup = self.state.is_open().then(|| self.render_popup(cx));

        v_flex()
            .w_full()
            .child(div().relative().w_full().child(trigger).child(bounds_tracker))
            .when_some(popup, |this, popup| {
                this.child(deferred(anchored().snap_to_window().child(popup)).with_priority(1))
            })
    }
}
