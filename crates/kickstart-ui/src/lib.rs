//! Kickstart UI - Leptos-based browser front end.
//!
//! This crate renders the kickstart page and hands it to
//! [`kickstart_core::PageController`] through a web-sys backed
//! [`kickstart_core::Dom`] and `localStorage`.

// View code tends to be long by nature
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod error;
pub mod logging;
pub mod theme;
pub mod web_dom;
pub mod web_storage;

pub use app::App;
pub use error::WebError;
pub use web_dom::WebDom;
pub use web_storage::LocalStorage;
