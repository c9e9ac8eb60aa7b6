//! In-memory document for tests and headless hosts.
//!
//! Nodes live in a slot map arena. Events are dispatched synchronously:
//! element listeners along the target's ancestor path first (bubbling), then
//! document listeners. Fades complete immediately and are recorded so tests
//! can assert on them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use super::{
    Dom, DomEvent, EventKind, EventTarget, Fade, FadeDone, Listener, ListenerId, Selector,
};
use crate::markup::{Element, Markup, escape_attr, escape_text};

new_key_type! {
    /// Handle to a node in a [`MemoryDom`].
    pub struct NodeId;
}

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Registration {
    target: EventTarget<NodeId>,
    kind: EventKind,
    listener: Listener<NodeId>,
}

/// A recorded fade transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeRecord {
    /// The faded node.
    pub node: NodeId,
    /// Fade direction.
    pub fade: Fade,
    /// Requested duration.
    pub duration: Duration,
}

struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    body: NodeId,
    listeners: BTreeMap<ListenerId, Registration>,
    next_listener: u64,
    viewport_width: u32,
    navigations: Vec<String>,
    scrolled: Vec<NodeId>,
    fades: Vec<FadeRecord>,
}

/// A document held entirely in memory.
///
/// Clones share the same document.
#[derive(Clone)]
pub struct MemoryDom {
    doc: Rc<RefCell<Document>>,
}

impl MemoryDom {
    /// Create an empty `<html><body></body></html>` document.
    #[must_use]
    pub fn new(viewport_width: u32) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData {
            kind: NodeKind::Element {
                tag: "html".to_string(),
                attrs: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        });
        let body = nodes.insert(NodeData {
            kind: NodeKind::Element {
                tag: "body".to_string(),
                attrs: Vec::new(),
            },
            parent: Some(root),
            children: Vec::new(),
        });
        if let Some(root_data) = nodes.get_mut(root) {
            root_data.children.push(body);
        }
        Self {
            doc: Rc::new(RefCell::new(Document {
                nodes,
                root,
                body,
                listeners: BTreeMap::new(),
                next_listener: 1,
                viewport_width,
                navigations: Vec::new(),
                scrolled: Vec::new(),
                fades: Vec::new(),
            })),
        }
    }

    /// Create a document whose body holds `content`.
    #[must_use]
    pub fn with_body(viewport_width: u32, content: &[Markup]) -> Self {
        let dom = Self::new(viewport_width);
        let body = dom.doc.borrow().body;
        dom.replace_content(&body, content);
        dom
    }

    /// The first element matching `selector` anywhere in the document.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> Option<NodeId> {
        self.query(&self.root(), selector)
    }

    /// Whether `node` is still attached to the arena.
    #[must_use]
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.doc.borrow().nodes.contains_key(node)
    }

    /// Serialize the children of `node` to HTML.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let doc = self.doc.borrow();
        let mut out = String::new();
        if let Some(data) = doc.nodes.get(node) {
            for child in &data.children {
                write_node(&doc, *child, &mut out);
            }
        }
        out
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.doc.borrow().listeners.len()
    }

    /// Urls passed to [`Dom::navigate`], oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.doc.borrow().navigations.clone()
    }

    /// Nodes passed to [`Dom::scroll_into_view`], oldest first.
    #[must_use]
    pub fn scrolled(&self) -> Vec<NodeId> {
        self.doc.borrow().scrolled.clone()
    }

    /// Fade transitions started so far, oldest first.
    #[must_use]
    pub fn fades(&self) -> Vec<FadeRecord> {
        self.doc.borrow().fades.clone()
    }

    /// Simulate a click on `node`. Returns whether a listener prevented the default action.
    pub fn click(&self, node: NodeId) -> bool {
        let path = self.ancestor_path(node);
        let event = DomEvent::new(EventKind::Click, Some(node), path.clone());
        let mut targets: Vec<EventTarget<NodeId>> =
            path.into_iter().map(EventTarget::Element).collect();
        targets.push(EventTarget::Document);
        self.dispatch(&targets, &event);
        event.default_prevented()
    }

    /// Simulate a key press delivered to the document.
    pub fn key_down(&self, key: &str) {
        let event = DomEvent::key(key);
        self.dispatch(&[EventTarget::Document], &event);
    }

    /// Change the viewport width and notify resize listeners.
    pub fn resize(&self, width: u32) {
        self.doc.borrow_mut().viewport_width = width;
        let event = DomEvent::resize(width);
        self.dispatch(&[EventTarget::Window], &event);
    }

    fn ancestor_path(&self, node: NodeId) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        let mut path = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(data) = doc.nodes.get(id) else {
                break;
            };
            path.push(id);
            current = data.parent;
        }
        path
    }

    /// Deliver `event` to each target in order. The listener set for a
    /// target is snapshotted when that target is reached; a listener removed
    /// before its turn is skipped.
    fn dispatch(&self, targets: &[EventTarget<NodeId>], event: &DomEvent<NodeId>) {
        for target in targets {
            let ids: Vec<ListenerId> = self
                .doc
                .borrow()
                .listeners
                .iter()
                .filter(|(_, reg)| reg.kind == event.kind && reg.target == *target)
                .map(|(id, _)| *id)
                .collect();
            for id in ids {
                let listener = self
                    .doc
                    .borrow()
                    .listeners
                    .get(&id)
                    .map(|reg| Rc::clone(&reg.listener));
                if let Some(listener) = listener {
                    listener(event);
                }
            }
        }
    }

    fn insert_markup(doc: &mut Document, parent: NodeId, markup: &Markup) -> NodeId {
        match markup {
            Markup::Text(text) => doc.nodes.insert(NodeData {
                kind: NodeKind::Text(text.clone()),
                parent: Some(parent),
                children: Vec::new(),
            }),
            Markup::Element(element) => {
                let id = doc.nodes.insert(NodeData {
                    kind: NodeKind::Element {
                        tag: element.tag().to_ascii_lowercase(),
                        attrs: element.attrs().to_vec(),
                    },
                    parent: Some(parent),
                    children: Vec::new(),
                });
                for child in element.child_nodes() {
                    let child_id = Self::insert_markup(doc, id, child);
                    if let Some(data) = doc.nodes.get_mut(id) {
                        data.children.push(child_id);
                    }
                }
                id
            }
        }
    }

    fn remove_subtree(doc: &mut Document, node: NodeId) {
        if let Some(data) = doc.nodes.remove(node) {
            for child in data.children {
                Self::remove_subtree(doc, child);
            }
        }
    }

    fn with_attrs<R>(
        &self,
        node: NodeId,
        f: impl FnOnce(&mut Vec<(String, String)>) -> R,
    ) -> Option<R> {
        let mut doc = self.doc.borrow_mut();
        match doc.nodes.get_mut(node).map(|data| &mut data.kind) {
            Some(NodeKind::Element { attrs, .. }) => Some(f(attrs)),
            _ => None,
        }
    }
}

fn node_matches(data: &NodeData, selector: &Selector) -> bool {
    let NodeKind::Element { tag, attrs } = &data.kind else {
        return false;
    };
    let attr = |name: &str| attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str());
    match selector {
        Selector::Tag(want) => tag.eq_ignore_ascii_case(want),
        Selector::Class(class) => {
            attr("class").is_some_and(|v| v.split_whitespace().any(|c| c == class))
        }
        Selector::Id(id) => attr("id") == Some(id.as_str()),
        Selector::Attr(name) => attr(name).is_some(),
        Selector::AttrValue(name, value) => attr(name) == Some(value.as_str()),
    }
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    let Some(data) = doc.nodes.get(node) else {
        return;
    };
    match &data.kind {
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
            }
            out.push('>');
            if Element::new(tag.as_str()).is_void() {
                return;
            }
            for child in &data.children {
                write_node(doc, *child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn collect_text(doc: &Document, node: NodeId, out: &mut String) {
    let Some(data) = doc.nodes.get(node) else {
        return;
    };
    match &data.kind {
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Element { .. } => {
            for child in &data.children {
                collect_text(doc, *child, out);
            }
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.doc.borrow().root
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.doc.borrow().body)
    }

    fn query_all(&self, scope: &NodeId, selector: &Selector) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = doc
            .nodes
            .get(*scope)
            .map(|d| d.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            let Some(data) = doc.nodes.get(id) else {
                continue;
            };
            if node_matches(data, selector) {
                found.push(id);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        found
    }

    fn matches(&self, node: &NodeId, selector: &Selector) -> bool {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .is_some_and(|data| node_matches(data, selector))
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        doc.nodes
            .get(*node)
            .map(|data| {
                data.children
                    .iter()
                    .copied()
                    .filter(|c| {
                        doc.nodes
                            .get(*c)
                            .is_some_and(|d| matches!(d.kind, NodeKind::Element { .. }))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.doc.borrow().nodes.get(*node).and_then(|d| d.parent)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        match self.doc.borrow().nodes.get(*node).map(|d| &d.kind) {
            Some(NodeKind::Element { tag, .. }) => tag.clone(),
            _ => String::new(),
        }
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_attrs(*node, |attrs| {
            attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.clone())
        })
        .flatten()
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        self.with_attrs(*node, |attrs| {
            if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.to_string();
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        });
    }

    fn remove_attr(&self, node: &NodeId, name: &str) {
        self.with_attrs(*node, |attrs| attrs.retain(|(n, _)| n != name));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|v| v.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let existing = self.attr(node, "class").unwrap_or_default();
        let value = if existing.trim().is_empty() {
            class.to_string()
        } else {
            format!("{} {class}", existing.trim())
        };
        self.set_attr(node, "class", &value);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(existing) = self.attr(node, "class") {
            let value = existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr(node, "class", &value);
        }
    }

    fn text(&self, node: &NodeId) -> String {
        let doc = self.doc.borrow();
        let mut out = String::new();
        collect_text(&doc, *node, &mut out);
        out
    }

    fn replace_content(&self, node: &NodeId, content: &[Markup]) {
        let mut doc = self.doc.borrow_mut();
        let Some(old) = doc.nodes.get_mut(*node).map(|d| std::mem::take(&mut d.children)) else {
            return;
        };
        for child in old {
            Self::remove_subtree(&mut doc, child);
        }
        let mut fresh = Vec::with_capacity(content.len());
        for markup in content {
            fresh.push(Self::insert_markup(&mut doc, *node, markup));
        }
        if let Some(data) = doc.nodes.get_mut(*node) {
            data.children = fresh;
        }
    }

    fn append(&self, node: &NodeId, markup: &Markup) -> Option<NodeId> {
        let mut doc = self.doc.borrow_mut();
        if !doc.nodes.contains_key(*node) {
            return None;
        }
        let id = Self::insert_markup(&mut doc, *node, markup);
        if let Some(data) = doc.nodes.get_mut(*node) {
            data.children.push(id);
        }
        matches!(markup, Markup::Element(_)).then_some(id)
    }

    fn remove(&self, node: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        if *node == doc.root || *node == doc.body {
            return;
        }
        let parent = doc.nodes.get(*node).and_then(|d| d.parent);
        if let Some(parent) = parent.and_then(|p| doc.nodes.get_mut(p)) {
            parent.children.retain(|c| c != node);
        }
        Self::remove_subtree(&mut doc, *node);
    }

    fn add_listener(
        &self,
        target: EventTarget<NodeId>,
        kind: EventKind,
        listener: Listener<NodeId>,
    ) -> ListenerId {
        let mut doc = self.doc.borrow_mut();
        let id = ListenerId::new(doc.next_listener);
        doc.next_listener += 1;
        doc.listeners.insert(
            id,
            Registration {
                target,
                kind,
                listener,
            },
        );
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        // Drop the listener outside the borrow; it may own handles to this document.
        let removed = self.doc.borrow_mut().listeners.remove(&id);
        removed.is_some()
    }

    fn viewport_width(&self) -> u32 {
        self.doc.borrow().viewport_width
    }

    fn fade(&self, node: &NodeId, fade: Fade, duration: Duration, done: Option<FadeDone>) {
        let opacity = match fade {
            Fade::In => "opacity: 1",
            Fade::Out => "opacity: 0",
        };
        self.set_attr(node, "style", opacity);
        self.doc.borrow_mut().fades.push(FadeRecord {
            node: *node,
            fade,
            duration,
        });
        if let Some(done) = done {
            done();
        }
    }

    fn navigate(&self, url: &str) {
        self.doc.borrow_mut().navigations.push(url.to_string());
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.doc.borrow_mut().scrolled.push(*node);
    }
}
