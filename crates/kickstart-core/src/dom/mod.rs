//! Document capability abstraction.
//!
//! Widgets never reach into a global document. They receive a [`Dom`]
//! implementation and talk to it through node handles, which keeps them
//! testable without a browser.
//!
//! # Example
//!
//! ```rust,ignore
//! use kickstart_core::dom::{Dom, Selector};
//!
//! fn mark_buttons<D: Dom>(dom: &D, root: &D::Node) {
//!     dom.select(root, &Selector::class("btn-primary"))
//!         .add_class("ready")
//!         .set_attr("data-bound", "true");
//! }
//!
//! // In production: a web-sys backed implementation.
//! // In tests:
//! let dom = MemoryDom::new(1024);
//! mark_buttons(&dom, &dom.root());
//! ```

pub mod memory;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::markup::Markup;

/// Callback invoked when an event reaches a listener.
pub type Listener<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// Callback invoked once a fade transition finishes.
pub type FadeDone = Box<dyn FnOnce()>;

/// Identifier returned by [`Dom::add_listener`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw listener number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw listener number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget<N> {
    /// The viewport (resize notifications).
    Window,
    /// The whole document (clicks and key presses after bubbling).
    Document,
    /// A specific element and its descendants.
    Element(N),
}

/// Events the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer click.
    Click,
    /// Key press.
    KeyDown,
    /// Viewport width change.
    Resize,
}

impl EventKind {
    /// The DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Resize => "resize",
        }
    }
}

/// Direction of an opacity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// Transition to fully opaque.
    In,
    /// Transition to fully transparent.
    Out,
}

/// An event delivered to a [`Listener`].
///
/// `path` is captured when dispatch starts, so handlers that replace markup
/// do not change what later listeners see.
pub struct DomEvent<N> {
    /// The kind of event.
    pub kind: EventKind,
    /// The element the event originated from, if any.
    pub target: Option<N>,
    /// The target followed by its ancestors at dispatch time.
    pub path: Vec<N>,
    /// The key for key events (`"Escape"`, `"Enter"`, ...).
    pub key: Option<String>,
    /// The viewport width for resize events.
    pub viewport_width: Option<u32>,
    default_prevented: Cell<bool>,
}

impl<N: PartialEq> DomEvent<N> {
    /// Create an event with an explicit propagation path.
    #[must_use]
    pub fn new(kind: EventKind, target: Option<N>, path: Vec<N>) -> Self {
        Self {
            kind,
            target,
            path,
            key: None,
            viewport_width: None,
            default_prevented: Cell::new(false),
        }
    }

    /// Create a key event.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        let mut event = Self::new(EventKind::KeyDown, None, Vec::new());
        event.key = Some(key.into());
        event
    }

    /// Create a resize event.
    #[must_use]
    pub fn resize(width: u32) -> Self {
        let mut event = Self::new(EventKind::Resize, None, Vec::new());
        event.viewport_width = Some(width);
        event
    }

    /// Whether `node` is the target or one of its ancestors at dispatch time.
    #[must_use]
    pub fn is_within(&self, node: &N) -> bool {
        self.path.iter().any(|n| n == node)
    }

    /// Ask the host to skip its default action (following a link).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a listener asked to skip the default action.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl<N: fmt::Debug> fmt::Debug for DomEvent<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomEvent")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("key", &self.key)
            .field("viewport_width", &self.viewport_width)
            .finish_non_exhaustive()
    }
}

/// A simple CSS selector: one tag, class, id or attribute test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches a tag name (`nav`).
    Tag(String),
    /// Matches a class (`.step-card`).
    Class(String),
    /// Matches an id (`#main-nav`).
    Id(String),
    /// Matches attribute presence (`[data-icon]`).
    Attr(String),
    /// Matches an attribute value (`[data-nav-item="0"]`).
    AttrValue(String, String),
}

impl Selector {
    /// Shorthand for [`Selector::Class`].
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Shorthand for [`Selector::Id`].
    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    /// Shorthand for [`Selector::Tag`].
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    /// Shorthand for [`Selector::Attr`].
    #[must_use]
    pub fn attr(name: impl Into<String>) -> Self {
        Self::Attr(name.into())
    }

    /// Parse a single simple selector. Returns `None` for anything richer.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || (input.contains(char::is_whitespace) && !input.starts_with('[')) {
            return None;
        }
        if let Some(rest) = input.strip_prefix('.') {
            return is_ident(rest).then(|| Self::Class(rest.to_string()));
        }
        if let Some(rest) = input.strip_prefix('#') {
            return is_ident(rest).then(|| Self::Id(rest.to_string()));
        }
        if let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    let name = name.trim();
                    is_ident(name).then(|| Self::AttrValue(name.to_string(), value.to_string()))
                }
                None => is_ident(inner.trim()).then(|| Self::Attr(inner.trim().to_string())),
            };
        }
        is_ident(input).then(|| Self::Tag(input.to_ascii_lowercase()))
    }

    /// Render as CSS selector text.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Tag(tag) => tag.clone(),
            Self::Class(class) => format!(".{class}"),
            Self::Id(id) => format!("#{id}"),
            Self::Attr(name) => format!("[{name}]"),
            Self::AttrValue(name, value) => format!("[{name}=\"{value}\"]"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Document operations the widgets depend on.
///
/// Node handles are cheap clones. Implementations must never invoke a
/// listener after [`Dom::remove_listener`] returned for it, even when the
/// removal happens in the middle of a dispatch.
pub trait Dom: Clone + 'static {
    /// Handle to an element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// The document element (`<html>`).
    fn root(&self) -> Self::Node;

    /// The `<body>` element.
    fn body(&self) -> Option<Self::Node>;

    /// All descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: &Self::Node, selector: &Selector) -> Vec<Self::Node>;

    /// The first descendant of `scope` matching `selector`.
    fn query(&self, scope: &Self::Node, selector: &Selector) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    /// Whether `node` matches `selector`.
    fn matches(&self, node: &Self::Node, selector: &Selector) -> bool;

    /// Element children of `node`, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Parent element of `node`.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `ancestor` is `node` or contains it.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if &n == ancestor {
                return true;
            }
            current = self.parent(&n);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &Selector) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if self.matches(&n, selector) {
                return Some(n);
            }
            current = self.parent(&n);
        }
        None
    }

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Attribute value.
    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute.
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attr(&self, node: &Self::Node, name: &str);

    /// Whether `node` carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add a class.
    fn add_class(&self, node: &Self::Node, class: &str);

    /// Remove a class.
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Concatenated text of `node` and its descendants.
    fn text(&self, node: &Self::Node) -> String;

    /// Replace every child of `node` with `content`.
    fn replace_content(&self, node: &Self::Node, content: &[Markup]);

    /// Append `markup` as the last child of `node` and return the new element.
    fn append(&self, node: &Self::Node, markup: &Markup) -> Option<Self::Node>;

    /// Detach `node` and its subtree from the document.
    fn remove(&self, node: &Self::Node);

    /// Register a listener. Listeners on the same target fire in registration order.
    fn add_listener(
        &self,
        target: EventTarget<Self::Node>,
        kind: EventKind,
        listener: Listener<Self::Node>,
    ) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;

    /// Start an opacity transition; `done` runs once it finishes.
    fn fade(&self, node: &Self::Node, fade: Fade, duration: Duration, done: Option<FadeDone>);

    /// Navigate the host page to `url`.
    fn navigate(&self, url: &str);

    /// Smoothly scroll `node` to the top of the viewport.
    fn scroll_into_view(&self, node: &Self::Node);

    /// Wrap every descendant of `scope` matching `selector` in a [`Selection`].
    fn select(&self, scope: &Self::Node, selector: &Selector) -> Selection<Self>
    where
        Self: Sized,
    {
        Selection::new(self.clone(), self.query_all(scope, selector))
    }
}

/// A set of nodes with chainable mutators.
///
/// Every mutator returns the selection itself, so calls can be chained.
#[derive(Clone)]
pub struct Selection<D: Dom> {
    dom: D,
    nodes: Vec<D::Node>,
}

impl<D: Dom> Selection<D> {
    /// Wrap `nodes`.
    #[must_use]
    pub const fn new(dom: D, nodes: Vec<D::Node>) -> Self {
        Self { dom, nodes }
    }

    /// Wrap a single node.
    #[must_use]
    pub fn one(dom: D, node: D::Node) -> Self {
        Self::new(dom, vec![node])
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The selected nodes.
    #[must_use]
    pub fn nodes(&self) -> &[D::Node] {
        &self.nodes
    }

    /// The first selected node.
    #[must_use]
    pub fn first(&self) -> Option<&D::Node> {
        self.nodes.first()
    }

    /// Descendants of the selected nodes matching `selector`.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> Self {
        let mut found = Vec::new();
        for node in &self.nodes {
            for hit in self.dom.query_all(node, selector) {
                if !found.contains(&hit) {
                    found.push(hit);
                }
            }
        }
        Self::new(self.dom.clone(), found)
    }

    /// Whether any selected node carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.nodes.iter().any(|n| self.dom.has_class(n, class))
    }

    /// Add a class to every node.
    pub fn add_class(&self, class: &str) -> &Self {
        for node in &self.nodes {
            self.dom.add_class(node, class);
        }
        self
    }

    /// Remove a class from every node.
    pub fn remove_class(&self, class: &str) -> &Self {
        for node in &self.nodes {
            self.dom.remove_class(node, class);
        }
        self
    }

    /// Set one attribute on every node.
    pub fn set_attr(&self, name: &str, value: &str) -> &Self {
        for node in &self.nodes {
            self.dom.set_attr(node, name, value);
        }
        self
    }

    /// Set several attributes on every node.
    pub fn set_attrs(&self, attrs: &[(&str, &str)]) -> &Self {
        for node in &self.nodes {
            for (name, value) in attrs {
                self.dom.set_attr(node, name, value);
            }
        }
        self
    }

    /// Fade every node out, then back in.
    pub fn pulse(&self, duration: Duration) -> &Self {
        for node in &self.nodes {
            let dom = self.dom.clone();
            let target = node.clone();
            self.dom.fade(
                node,
                Fade::Out,
                duration,
                Some(Box::new(move || dom.fade(&target, Fade::In, duration, None))),
            );
        }
        self
    }

    /// Attach `listener` to every node and return the listener ids.
    pub fn on(&self, kind: EventKind, listener: &Listener<D::Node>) -> Vec<ListenerId> {
        self.nodes
            .iter()
            .map(|node| {
                self.dom.add_listener(
                    EventTarget::Element(node.clone()),
                    kind,
                    Rc::clone(listener),
                )
            })
            .collect()
    }
}

impl<D: Dom> fmt::Debug for Selection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("nodes", &self.nodes)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse(".step-card"), Some(Selector::class("step-card")));
        assert_eq!(Selector::parse("#main-nav"), Some(Selector::id("main-nav")));
        assert_eq!(Selector::parse("MAIN"), Some(Selector::tag("main")));
        assert_eq!(Selector::parse("[data-icon]"), Some(Selector::attr("data-icon")));
        assert_eq!(
            Selector::parse("[data-nav-item=\"2\"]"),
            Some(Selector::AttrValue("data-nav-item".into(), "2".into()))
        );
    }

    #[test]
    fn test_selector_parse_rejects_compound() {
        assert_eq!(Selector::parse(".jumbotron .btn"), None);
        assert_eq!(Selector::parse(""), None);
        assert_eq!(Selector::parse("."), None);
    }

    #[test]
    fn test_selector_css_round_trip() {
        for css in [".btn", "#x", "main", "[data-icon]", "[data-nav-item=\"1\"]"] {
            let selector = Selector::parse(css);
            assert_eq!(selector.map(|s| s.to_css()).as_deref(), Some(css));
        }
    }

    #[test]
    fn test_event_path_membership() {
        let event = DomEvent::new(EventKind::Click, Some(3), vec![3, 2, 1]);
        assert!(event.is_within(&1));
        assert!(!event.is_within(&4));
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn test_resize_and_key_events() {
        let resize = DomEvent::<u32>::resize(640);
        assert_eq!(resize.kind, EventKind::Resize);
        assert_eq!(resize.viewport_width, Some(640));

        let key = DomEvent::<u32>::key("Escape");
        assert_eq!(key.kind, EventKind::KeyDown);
        assert_eq!(key.key.as_deref(), Some("Escape"));
    }
}
