//! Languages Demo - Entry Point
//!
//! Static language lists exercising accessors, filters and disabled options.

use anyhow::Context;
use gpui::AppContext;
use select_kit::app::application::{init_tracing, run_app};
use select_kit::demos::LanguagesDemo;
use select_kit::states::DemoSettings;

fn main() -> anyhow::Result<()> {
    init_tracing().context("Failed to initialize logging")?;
    tracing::info!("Starting languages demo...");

    let settings = DemoSettings::try_load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default settings");
        DemoSettings::new()
    });
    let title = select_kit::i18n::t(settings.locale(), "languages-title");

    run_app(title, settings, |window, cx| {
        cx.new(|cx| LanguagesDemo::new(window, cx))
    });
    Ok(())
}
