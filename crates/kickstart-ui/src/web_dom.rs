//! `Dom` implementation over the live browser document.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use kickstart_core::dom::{
    Dom, DomEvent, EventKind, EventTarget, Fade, FadeDone, Listener, ListenerId, Selector,
};
use kickstart_core::markup::Markup;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::error::{WebError, js_error_message};

type JsHandler = Closure<dyn FnMut(web_sys::Event)>;

struct Registration {
    target: web_sys::EventTarget,
    kind: EventKind,
    handler: JsHandler,
    active: Rc<Cell<bool>>,
}

struct Inner {
    window: Window,
    document: Document,
    root: Element,
    listeners: RefCell<HashMap<ListenerId, Registration>>,
    retired: Retired<JsHandler>,
    next_listener: Cell<u64>,
}

/// Detached handlers waiting for every running dispatch to return.
///
/// A listener may remove itself, or another listener further up the
/// stack, while the browser is still inside its closure. Dropping that
/// closure there would free code that is executing, so removal parks it
/// here until the dispatch depth is back to zero.
struct Retired<T> {
    depth: Rc<Cell<u32>>,
    pending: RefCell<Vec<T>>,
}

impl<T> Retired<T> {
    fn new() -> Self {
        Self {
            depth: Rc::new(Cell::new(0)),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Counter that handler closures bump for the length of a dispatch.
    fn depth(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.depth)
    }

    fn retire(&self, item: T) {
        self.pending.borrow_mut().push(item);
        self.sweep();
    }

    /// Drop parked items unless a dispatch is still on the stack.
    fn sweep(&self) {
        if self.depth.get() > 0 {
            return;
        }
        let released = std::mem::take(&mut *self.pending.borrow_mut());
        drop(released);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl<T> Drop for Retired<T> {
    fn drop(&mut self) {
        // Torn down from inside a handler: leak rather than free a running closure.
        if self.depth.get() > 0 {
            for item in self.pending.get_mut().drain(..) {
                std::mem::forget(item);
            }
        }
    }
}

/// Marks one dispatch in progress until dropped.
struct Dispatch(Rc<Cell<u32>>);

impl Dispatch {
    fn enter(depth: &Rc<Cell<u32>>) -> Self {
        depth.set(depth.get() + 1);
        Self(Rc::clone(depth))
    }
}

impl Drop for Dispatch {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl Registration {
    fn detach(&self) {
        self.active.set(false);
        if let Err(e) = self.target.remove_event_listener_with_callback(
            self.kind.as_str(),
            self.handler.as_ref().unchecked_ref(),
        ) {
            warn!(error = %js_error_message(&e), "removeEventListener failed");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for (_, registration) in self.listeners.get_mut().drain() {
            registration.detach();
            self.retired.retire(registration.handler);
        }
    }
}

/// The browser document. Clones share listener bookkeeping.
#[derive(Clone)]
pub struct WebDom {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDom")
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebDom {
    /// Bind to the global window and document.
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let root = document.document_element().ok_or(WebError::NoDocument)?;
        Ok(Self {
            inner: Rc::new(Inner {
                window,
                document,
                root,
                listeners: RefCell::new(HashMap::new()),
                retired: Retired::new(),
                next_listener: Cell::new(1),
            }),
        })
    }

    /// The global window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.inner.window
    }

    fn js_target(&self, target: EventTarget<Element>) -> web_sys::EventTarget {
        match target {
            EventTarget::Window => self.inner.window.clone().into(),
            EventTarget::Document => self.inner.document.clone().into(),
            EventTarget::Element(element) => element.into(),
        }
    }
}

/// Translate a browser event into the widget-facing form.
fn translate(kind: EventKind, event: &web_sys::Event, window: &Window) -> DomEvent<Element> {
    match kind {
        EventKind::Click => {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let path = event
                .composed_path()
                .iter()
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect();
            DomEvent::new(kind, target, path)
        }
        EventKind::KeyDown => {
            let key = event
                .dyn_ref::<KeyboardEvent>()
                .map(KeyboardEvent::key)
                .unwrap_or_default();
            DomEvent::key(key)
        }
        EventKind::Resize => DomEvent::resize(inner_width(window)),
    }
}

fn inner_width(window: &Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map_or(0, |w| w.max(0.0) as u32)
}

fn html_of(content: &[Markup]) -> String {
    content.iter().map(Markup::to_html).collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn root(&self) -> Element {
        self.inner.root.clone()
    }

    fn body(&self) -> Option<Element> {
        self.inner.document.body().map(Into::into)
    }

    fn query_all(&self, scope: &Element, selector: &Selector) -> Vec<Element> {
        let Ok(list) = scope.query_selector_all(&selector.to_css()) else {
            warn!(%selector, "querySelectorAll rejected selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn matches(&self, node: &Element, selector: &Selector) -> bool {
        node.matches(&selector.to_css()).unwrap_or(false)
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node))
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            warn!(name, error = %js_error_message(&e), "setAttribute failed");
        }
    }

    fn remove_attr(&self, node: &Element, name: &str) {
        if let Err(e) = node.remove_attribute(name) {
            warn!(name, error = %js_error_message(&e), "removeAttribute failed");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            warn!(class, error = %js_error_message(&e), "classList.add failed");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            warn!(class, error = %js_error_message(&e), "classList.remove failed");
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn replace_content(&self, node: &Element, content: &[Markup]) {
        node.set_inner_html(&html_of(content));
    }

    fn append(&self, node: &Element, markup: &Markup) -> Option<Element> {
        if let Err(e) = node.insert_adjacent_html("beforeend", &markup.to_html()) {
            warn!(error = %js_error_message(&e), "insertAdjacentHTML failed");
            return None;
        }
        markup.as_element().and(node.last_element_child())
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn add_listener(
        &self,
        target: EventTarget<Element>,
        kind: EventKind,
        listener: Listener<Element>,
    ) -> ListenerId {
        self.inner.retired.sweep();
        let id = ListenerId::new(self.inner.next_listener.get());
        self.inner.next_listener.set(id.get() + 1);

        let active = Rc::new(Cell::new(true));
        let flag = Rc::clone(&active);
        let depth = self.inner.retired.depth();
        let window = self.inner.window.clone();
        let handler: JsHandler = Closure::new(move |event: web_sys::Event| {
            if !flag.get() {
                return;
            }
            let _dispatch = Dispatch::enter(&depth);
            let translated = translate(kind, &event, &window);
            listener(&translated);
            if translated.default_prevented() {
                event.prevent_default();
            }
        });

        let target = self.js_target(target);
        if let Err(e) =
            target.add_event_listener_with_callback(kind.as_str(), handler.as_ref().unchecked_ref())
        {
            warn!(event = kind.as_str(), error = %js_error_message(&e), "addEventListener failed");
        }
        self.inner.listeners.borrow_mut().insert(
            id,
            Registration {
                target,
                kind,
                handler,
                active,
            },
        );
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.inner.listeners.borrow_mut().remove(&id);
        match removed {
            Some(registration) => {
                registration.detach();
                self.inner.retired.retire(registration.handler);
                true
            }
            None => false,
        }
    }

    fn viewport_width(&self) -> u32 {
        inner_width(&self.inner.window)
    }

    fn fade(&self, node: &Element, fade: Fade, duration: Duration, done: Option<FadeDone>) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let style = element.style();
            let opacity = match fade {
                Fade::In => "1",
                Fade::Out => "0",
            };
            let applied = style
                .set_property("transition", &format!("opacity {millis}ms ease"))
                .and_then(|()| style.set_property("opacity", opacity));
            if let Err(e) = applied {
                warn!(error = %js_error_message(&e), "Failed to start fade");
            }
        }
        if let Some(done) = done {
            Timeout::new(millis, done).forget();
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.inner.window.location().set_href(url) {
            warn!(url, error = %js_error_message(&e), "Navigation failed");
        }
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
