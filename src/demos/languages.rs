//! Languages Demo
//!
//! Static option lists wired through field accessors, a filter predicate,
//! disabled options and the three control sizes.

use std::sync::Arc;

use gpui::{
    Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Subscription,
    Window, div, prelude::*,
};
use gpui_component::{ActiveTheme, h_flex, v_flex};
use serde::Serialize;
use tracing::{debug, warn};

use crate::components::select::{
    Accessor, OptionFilter, Select, SelectEvent, SelectProps, SelectSize, SelectValue,
};
use crate::states::tr;

/// One entry of the language list
#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    /// No longer offered for new profiles
    pub deprecated: bool,
}

const fn language(code: &'static str, name: &'static str) -> Language {
    Language {
        code,
        name,
        deprecated: false,
    }
}

pub const LANGUAGES: &[Language] = &[
    language("az", "Azərbaycan"),
    language("en", "English"),
    language("tr", "Türkçe"),
    language("ru", "Русский"),
    language("de", "Deutsch"),
    language("fr", "Français"),
    language("es", "Español"),
    language("ka", "ქართული"),
    language("fa", "فارسی"),
    language("zh", "中文"),
    Language {
        code: "az-cyrl",
        name: "Азәрбајҹан (кирил)",
        deprecated: true,
    },
];

/// Proficiency level, read through the default `label`/`value` fields
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub label: &'static str,
    pub value: u8,
}

pub const LEVELS: &[Level] = &[
    Level { label: "A1", value: 1 },
    Level { label: "A2", value: 2 },
    Level { label: "B1", value: 3 },
    Level { label: "B2", value: 4 },
    Level { label: "C1", value: 5 },
    Level { label: "C2", value: 6 },
];

/// Spoken languages exclude the primary one
fn excluding(code: Option<String>) -> Option<OptionFilter<Language>> {
    let code = code?;
    Some(Arc::new(move |language: &Language, _: usize, _: &[Language]| {
        language.code != code
    }))
}

/// Root view of the languages demo
pub struct LanguagesDemo {
    primary: Entity<Select<Language, String>>,
    spoken: Entity<Select<Language, String>>,
    level: Entity<Select<Level, u8>>,
    primary_value: Vec<String>,
    spoken_value: Vec<String>,
    level_value: Vec<u8>,
    _subscriptions: Vec<Subscription>,
}

impl LanguagesDemo {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let primary_props = SelectProps::new(LANGUAGES.to_vec())
            .get_label(Accessor::field("name"))
            .get_value(Accessor::field("code"))
            .disable_option(|language: &Language| language.deprecated)
            .placeholder(tr(cx, "languages-placeholder"))
            .name("primary")
            .size(SelectSize::Large)
            .searchable(true)
            .close_on_select(true);
        let primary = cx.new(|cx| Select::new(primary_props, window, cx));

        let spoken_props = SelectProps::new(LANGUAGES.to_vec())
            .get_label(Accessor::field("name"))
            .get_value(Accessor::field("code"))
            .disable_option(|language: &Language| language.deprecated)
            .name("spoken")
            .size(SelectSize::Medium)
            .multiple(true)
            .searchable(true)
            .disabled(true);
        let spoken = cx.new(|cx| Select::new(spoken_props, window, cx));

        let level_props = SelectProps::new(LEVELS.to_vec())
            .name("level")
            .size(SelectSize::Small)
            .close_on_select(true)
            .disable_clear(true)
            .hide_arrow(true);
        let level = cx.new(|cx| Select::new(level_props, window, cx));

        let subscriptions = vec![
            cx.subscribe_in(
                &primary,
                window,
                |this, select, event: &SelectEvent<String>, window, cx| match event {
                    SelectEvent::Change(next) => {
                        this.primary_value = next.clone();
                        select.update(cx, |select, cx| select.set_value(next.clone(), cx));
                        this.sync_spoken(window, cx);
                    }
                    SelectEvent::Blur => debug!("Primary language select blurred"),
                },
            ),
            cx.subscribe(&spoken, |this, select, event: &SelectEvent<String>, cx| {
                if let SelectEvent::Change(next) = event {
                    this.spoken_value = next.clone();
                    select.update(cx, |select, cx| select.set_value(next.clone(), cx));
                    cx.notify();
                }
            }),
            cx.subscribe(&level, |this, select, event: &SelectEvent<u8>, cx| {
                if let SelectEvent::Change(next) = event {
                    this.level_value = next.clone();
                    select.update(cx, |select, cx| select.set_value(next.clone(), cx));
                    cx.notify();
                }
            }),
        ];

        Self {
            primary,
            spoken,
            level,
            primary_value: Vec::new(),
            spoken_value: Vec::new(),
            level_value: Vec::new(),
            _subscriptions: subscriptions,
        }
    }

    /// Keep the spoken list consistent with the primary language
    fn sync_spoken(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let primary = self.primary_value.first().cloned();
        self.spoken_value.retain(|code| Some(code) != primary.as_ref());
        let spoken_value = self.spoken_value.clone();

        self.spoken.update(cx, |select, cx| {
            select.set_disabled(primary.is_none(), window, cx);
            select.set_value(spoken_value, cx);
            if let Err(e) = select.set_filter(excluding(primary), cx) {
                warn!(error = %e, "Failed to filter spoken languages");
            }
        });
        cx.notify();
    }

    fn describe<T: Serialize + 'static, V: SelectValue>(
        select: &Entity<Select<T, V>>,
        value: &[V],
        cx: &Context<Self>,
    ) -> SharedString {
        let labels: Vec<_> = select
            .read(cx)
            .collection()
            .selected_items(value)
            .into_iter()
            .map(|item| item.label.to_string())
            .collect();
        if labels.is_empty() {
            tr(cx, "demo-none")
        } else {
            labels.join(", ").into()
        }
    }

    fn render_field(
        &self,
        label: SharedString,
        control: impl IntoElement,
        value: SharedString,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        v_flex()
            .gap_1()
            .child(div().text_sm().child(label))
            .child(control)
            .child(
                h_flex()
                    .gap_1()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!("{}:", tr(cx, "demo-value")))
                    .child(value),
            )
    }
}

impl Render for LanguagesDemo {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let primary = Self::describe(&self.primary, &self.primary_value, cx);
        let spoken = Self::describe(&self.spoken, &self.spoken_value, cx);
        let level = Self::describe(&self.level, &self.level_value, cx);

        v_flex()
            .size_full()
            .p_4()
            .gap_4()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .child(div().text_lg().child(tr(cx, "languages-title")))
            .child(self.render_field(
                tr(cx, "languages-primary"),
                self.primary.clone(),
                primary,
                cx,
            ))
            .child(self.render_field(
                tr(cx, "languages-spoken"),
                self.spoken.clone(),
                spoken,
                cx,
            ))
            .child(self.render_field(
                tr(cx, "languages-level"),
                div().w_32().child(self.level.clone()),
                level,
                cx,
            ))
    }
}
