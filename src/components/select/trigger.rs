//! Select Trigger
//!
//! The collapsed face of the select: current value, clear button and arrow.

use gpui::{
    AnyElement, App, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};
use gpui_component::{ActiveTheme, Icon, IconName, h_flex};

use super::state::ValueDisplay;
use super::virtualizer::SelectSize;
use crate::constants::TRIGGER_MIN_WIDTH;

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

/// Trigger button of a select control
#[derive(IntoElement)]
pub struct SelectTrigger {
    id: ElementId,
    display: ValueDisplay,
    size: SelectSize,
    open: bool,
    disabled: bool,
    clearable: bool,
    arrow: bool,
    on_toggle: Option<ClickHandler>,
    on_clear: Option<ClickHandler>,
}

impl SelectTrigger {
    /// Create a new trigger
    pub fn new(id: impl Into<ElementId>, display: ValueDisplay) -> Self {
        Self {
            id: id.into(),
            display,
            size: SelectSize::default(),
            open: false,
            disabled: false,
            clearable: false,
            arrow: true,
            on_toggle: None,
            on_clear: None,
        }
    }

    pub fn size(mut self, size: SelectSize) -> Self {
        self.size = size;
        self
    }

    /// Whether the popup is currently shown
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show the clear button
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Show the dropdown arrow
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    pub fn on_toggle(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_toggle = Some(Box::new(handler));
        self
    }

    pub fn on_clear(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_clear = Some(Box::new(handler));
        self
    }
}

fn tag(label: SharedString, cx: &App) -> impl IntoElement {
    div()
        .px_1()
        .rounded_sm()
        .bg(cx.theme().secondary)
        .text_xs()
        .whitespace_nowrap()
        .child(label)
}

fn render_value(display: ValueDisplay, cx: &App) -> AnyElement {
    match display {
        ValueDisplay::Placeholder(text) => div()
            .text_color(cx.theme().muted_foreground)
            .child(text)
            .into_any_element(),
        ValueDisplay::Single(label) => div()
            .overflow_hidden()
            .whitespace_nowrap()
            .text_ellipsis()
            .text_color(cx.theme().foreground)
            .child(label)
            .into_any_element(),
        ValueDisplay::Tags { labels, overflow } => h_flex()
            .gap_1()
            .overflow_hidden()
            .text_color(cx.theme().foreground)
            .children(labels.into_iter().map(|label| tag(label, cx)))
            .when_some(overflow, |this, count| {
                this.child(tag(ValueDisplay::overflow_text(count), cx))
            })
            .into_any_element(),
    }
}

impl RenderOnce for SelectTrigger {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let border_color = if self.open {
            cx.theme().primary
        } else {
            cx.theme().border
        };
        let muted = cx.theme().muted_foreground;
        let hover_bg = cx.theme().muted;

        let value = render_value(self.display, cx);

        let clear = self.on_clear.filter(|_| self.clearable && !self.disabled).map(|handler| {
            div()
                .id("select-clear")
                .flex()
                .items_center()
                .rounded_sm()
                .cursor_pointer()
                .hover(move |this| this.bg(hover_bg))
                .child(Icon::new(IconName::Close).size_3().text_color(muted))
                .on_click(move |event, window, cx| {
                    cx.stop_propagation();
                    handler(event, window, cx);
                })
        });

        let arrow = self.arrow.then(|| {
            let icon = if self.open {
                IconName::ChevronUp
            } else {
                IconName::ChevronDown
            };
            Icon::new(icon).size_4().text_color(muted)
        });

        let text_size = self.size;
        let mut trigger = h_flex()
            .id(self.id)
            .w_full()
            .min_w(px(TRIGGER_MIN_WIDTH))
            .min_h(px(self.size.row_height()))
            .px_2()
            .py_1()
            .gap_1()
            .items_center()
            .justify_between()
            .bg(cx.theme().background)
            .border_1()
            .border_color(border_color)
            .rounded_md()
            .map(|this| match text_size {
                SelectSize::Small => this.text_xs(),
                SelectSize::Medium => this.text_sm(),
                SelectSize::Large => this.text_base(),
            })
            .child(div().flex_1().overflow_hidden().child(value))
            .child(
                h_flex()
                    .gap_1()
                    .items_center()
                    .children(clear)
                    .children(arrow),
            );

        if self.disabled {
            trigger = trigger.opacity(0.5).cursor_not_allowed();
        } else {
            trigger = trigger.cursor_pointer();
            if let Some(handler) = self.on_toggle {
                trigger = trigger.on_click(move |event, window, cx| handler(event, window, cx));
            }
        }

        trigger
    }
}
