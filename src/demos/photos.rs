//! Photos Demo
//!
//! Multi-select over the remote photo list, with search and virtualized rows.

use gpui::{
    App, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Subscription,
    Window, div, prelude::*,
};
use gpui_component::{
    ActiveTheme, Selectable, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use tracing::{debug, info, warn};

use crate::components::select::{Accessor, Select, SelectEvent, SelectProps, SelectSize};
use crate::i18n::Locale;
use crate::services::{Photo, fetch_photos, run_in_tokio};
use crate::states::{DemoSettings, tr};

const SIZES: [(SelectSize, &str, &str); 3] = [
    (SelectSize::Small, "size-sm", "sm"),
    (SelectSize::Medium, "size-md", "md"),
    (SelectSize::Large, "size-lg", "lg"),
];

/// Root view of the photos demo
pub struct PhotosDemo {
    select: Entity<Select<Photo, u64>>,
    /// Controlled value of the select
    value: Vec<u64>,
    loading: bool,
    _subscriptions: Vec<Subscription>,
}

impl PhotosDemo {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let settings = cx.try_global::<DemoSettings>().cloned().unwrap_or_default();

        let props = SelectProps::new(Vec::new())
            .get_label(Accessor::function(|photo: &Photo| photo.label()))
            .get_value(Accessor::function(|photo: &Photo| photo.id))
            .placeholder(tr(cx, "photos-placeholder"))
            .name("photos")
            .size(settings.size())
            .multiple(true)
            .searchable(true)
            .enable_virtual(settings.enable_virtual());
        let select = cx.new(|cx| Select::new(props, window, cx));

        let subscription = cx.subscribe(&select, |this, select, event: &SelectEvent<u64>, cx| {
            match event {
                SelectEvent::Change(next) => {
                    this.value = next.clone();
                    select.update(cx, |select, cx| select.set_value(next.clone(), cx));
                    cx.notify();
                }
                SelectEvent::Blur => debug!("Photos select blurred"),
            }
        });

        let mut demo = Self {
            select,
            value: Vec::new(),
            loading: false,
            _subscriptions: vec![subscription],
        };
        demo.load(settings.photos_url().to_string(), cx);
        demo
    }

    /// Fetch the photo list and hand it to the select
    fn load(&mut self, url: String, cx: &mut Context<Self>) {
        self.loading = true;
        cx.spawn(async move |this, cx| {
            let result = run_in_tokio(fetch_photos(url)).await;
            let _ = this.update(cx, |this, cx| {
                this.loading = false;
                match result {
                    Ok(photos) => {
                        let count = photos.len();
                        if let Err(e) = this
                            .select
                            .update(cx, |select, cx| select.set_options(photos, cx))
                        {
                            warn!(error = %e, "Failed to apply photos");
                        } else {
                            info!(count, "Photos loaded");
                        }
                    }
                    Err(e) => warn!(error = %e, "Failed to fetch photos"),
                }
                cx.notify();
            });
        })
        .detach();
    }

    // ==================== Settings ====================

    /// Apply `change` to the global settings and write them back to disk
    fn update_settings(cx: &mut Context<Self>, change: impl FnOnce(&mut DemoSettings)) {
        let settings = cx.default_global::<DemoSettings>();
        change(settings);
        if let Err(e) = settings.save() {
            warn!(error = %e, "Failed to save settings");
        }
    }

    fn set_size(&mut self, size: SelectSize, cx: &mut Context<Self>) {
        Self::update_settings(cx, |settings| settings.set_size(size));
        self.select.update(cx, |select, cx| select.set_size(size, cx));
        cx.notify();
    }

    fn toggle_virtual(&mut self, cx: &mut Context<Self>) {
        let enable_virtual = !self.select.read(cx).config().enable_virtual;
        Self::update_settings(cx, |settings| settings.set_enable_virtual(enable_virtual));
        self.select
            .update(cx, |select, cx| select.set_enable_virtual(enable_virtual, cx));
        cx.notify();
    }

    fn toggle_locale(&mut self, cx: &mut Context<Self>) {
        let next = match locale(cx) {
            Locale::Az => Locale::En,
            Locale::En => Locale::Az,
        };
        Self::update_settings(cx, |settings| settings.set_locale(next));
        info!(locale = next.code(), "Locale changed");
        cx.refresh_windows();
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let muted = cx.theme().muted_foreground;
        let (current_size, enable_virtual) = {
            let config = self.select.read(cx).config();
            (config.size, config.enable_virtual)
        };

        let size_buttons = SIZES
            .into_iter()
            .map(|(size, id, label)| {
                Button::new(id)
                    .ghost()
                    .small()
                    .label(label)
                    .selected(size == current_size)
                    .on_click(cx.listener(move |this, _, _, cx| this.set_size(size, cx)))
            })
            .collect::<Vec<_>>();

        h_flex()
            .gap_1()
            .items_center()
            .text_sm()
            .child(div().text_color(muted).child(tr(cx, "settings-size")))
            .children(size_buttons)
            .child(
                Button::new("toggle-virtual")
                    .ghost()
                    .small()
                    .label(tr(cx, "settings-virtual"))
                    .selected(enable_virtual)
                    .on_click(cx.listener(|this, _, _, cx| this.toggle_virtual(cx))),
            )
            .child(
                Button::new("toggle-locale")
                    .ghost()
                    .small()
                    .label(format!("{}: {}", tr(cx, "settings-language"), locale(cx).display_name()))
                    .on_click(cx.listener(|this, _, _, cx| this.toggle_locale(cx))),
            )
    }

    fn summary(&self, cx: &Context<Self>) -> SharedString {
        let select = self.select.read(cx);
        let labels: Vec<_> = select
            .collection()
            .selected_items(&self.value)
            .into_iter()
            .map(|item| item.label.to_string())
            .collect();
        if labels.is_empty() {
            return tr(cx, "demo-none");
        }
        labels.join(", ").into()
    }
}

fn locale(cx: &App) -> Locale {
    cx.try_global::<DemoSettings>()
        .map(DemoSettings::locale)
        .unwrap_or_default()
}

impl Render for PhotosDemo {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let muted = cx.theme().muted_foreground;

        v_flex()
            .size_full()
            .p_4()
            .gap_3()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .child(div().text_lg().child(tr(cx, "photos-title")))
            .child(self.render_toolbar(cx))
            .child(div().w_full().child(self.select.clone()))
            .when(self.loading, |this| {
                this.child(div().text_sm().text_color(muted).child(tr(cx, "photos-loading")))
            })
            .child(
                v_flex()
                    .gap_1()
                    .text_sm()
                    .child(
                        div()
                            .text_color(muted)
                            .child(format!("{} ({})", tr(cx, "photos-selected"), self.value.len())),
                    )
                    .child(div().child(self.summary(cx))),
            )
    }
}
