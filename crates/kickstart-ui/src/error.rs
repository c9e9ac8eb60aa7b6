//! Browser-side error types.

use wasm_bindgen::JsValue;

/// Failures setting up browser collaborators.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// No global `window` (not running in a browser).
    #[error("No window object available")]
    NoWindow,

    /// The window has no document.
    #[error("No document available")]
    NoDocument,

    /// `localStorage` is missing or blocked.
    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A JavaScript call threw.
    #[error("JavaScript error: {0}")]
    Js(String),

    /// The page could not be wired.
    #[error(transparent)]
    Page(#[from] kickstart_core::Error),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// Best-effort text for a thrown JavaScript value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    let field = |name: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (None, Some(message)) => message,
        (Some(name), None) => name,
        (None, None) => format!("{value:?}"),
    }
}

/// The `name` property of a thrown value, e.g. `"QuotaExceededError"`.
pub fn js_error_name(value: &JsValue) -> Option<String> {
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
}
