//! Application - App Initialization and Window Management
//!
//! Shared bootstrap for the demo binaries.

use gpui::{
    AnyView, App, AppContext, Application, Bounds, Entity, Render, SharedString, TitlebarOptions,
    Window, WindowBounds, WindowOptions, actions, px,
};
use gpui_component::Root;
use tracing::{error, info};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::helpers::is_development;
use crate::states::DemoSettings;

actions!(select_kit, [Quit]);

/// Initialize tracing for logging. Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    let level = if is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .finish()
        .try_init()
}

/// Run a demo application whose window content is built by `build_root`
pub fn run_app<V, F>(title: impl Into<SharedString>, settings: DemoSettings, build_root: F)
where
    V: Render,
    F: FnOnce(&mut Window, &mut App) -> Entity<V> + 'static,
{
    let title = title.into();
    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            gpui_component::init(cx);
            cx.set_global(settings);

            // Set up action handlers
            cx.on_action(|_: &Quit, cx: &mut App| cx.quit());

            // Quit the app when all windows are closed
            cx.on_window_closed(|cx| {
                if cx.windows().is_empty() {
                    cx.quit();
                }
            })
            .detach();

            let bounds = Bounds::centered(
                None,
                gpui::size(px(DEFAULT_WINDOW_WIDTH), px(DEFAULT_WINDOW_HEIGHT)),
                cx,
            );
            let window_options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(title.clone()),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let opened = cx.open_window(window_options, |window, cx| {
                let view: AnyView = build_root(window, cx).into();
                cx.new(|cx| Root::new(view, window, cx))
            });
            if let Err(e) = opened {
                error!(error = %e, title = %title, "Failed to open window");
                cx.quit();
                return;
            }

            info!(title = %title, "Window opened");
            cx.activate(true);
        });
}
