//! Kickstart Core Library
//!
//! This crate provides the widgets and glue behind the kickstart page:
//! - A responsive navigation bar with dropdowns and a collapse breakpoint
//! - An icon scanner that resolves `data-icon` markers into inline SVG
//! - A namespaced JSON preference store over a key/value medium
//! - A page controller wiring those together, plus a console walkthrough
//!
//! Nothing here touches a browser directly. Widgets receive a [`Dom`]
//! implementation and a [`StorageMedium`]; [`dom::memory::MemoryDom`] and
//! [`storage::memory::MemoryStorage`] back the tests.
//!
//! # Error Handling
//!
//! Construction and caller mistakes are typed errors; environment problems
//! (unknown icons, corrupt preferences) are logged and degrade. See the
//! [`error`] module for details.
//!
//! ```rust,ignore
//! use kickstart_core::{PageConfig, PageController, Result};
//!
//! fn start<D: Dom, S: StorageMedium + 'static>(
//!     dom: D,
//!     storage: S,
//! ) -> Result<PageController<D, S>> {
//!     let root = dom.root();
//!     PageController::initialize(dom, storage, IconSet::builtin(), &root, PageConfig::default())
//! }
//! ```

pub mod config;
pub mod demo;
pub mod dom;
pub mod error;
pub mod icons;
pub mod markup;
pub mod navbar;
pub mod page;
pub mod storage;
pub mod theme;

pub use config::{DEFAULT_NAMESPACE, PageConfig, STEP_ICON_SIZE, StepCard};
pub use demo::{DemoReport, DemoUser, pick, relative_time, run_examples};
pub use dom::{
    Dom, DomEvent, EventKind, EventTarget, Fade, FadeDone, Listener, ListenerId, Selection,
    Selector,
};
pub use error::{ConfigError, Error, Result, StorageError};
pub use icons::{
    DEFAULT_ICON_SIZE, IconDef, IconOutcome, IconRegistry, IconScanner, IconSet, Scan,
    ScanSummary,
};
pub use markup::{Element, Markup};
pub use navbar::{
    Activation, Brand, DEFAULT_COLLAPSE_AT, MenuItem, NavBar, NavBarConfig, NavBarState,
    Presentation, Toggle, Variant,
};
pub use page::{PULSE_DURATION, PageController};
pub use storage::{PreferenceStore, StorageMedium};
pub use theme::{THEME_KEY, Theme};
