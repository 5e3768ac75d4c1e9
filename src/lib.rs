//! select-kit
//!
//! A searchable, optionally virtualized single/multi select control for
//! gpui applications built on gpui-component, plus the demo views that
//! exercise it.

pub mod app;
pub mod components;
pub mod constants;
pub mod demos;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod services;
pub mod states;
