//! Icon marker resolution.
//!
//! A marker is any element carrying `data-icon="name"`, optionally with
//! `data-icon-size`. Scanning replaces the marker's content with the rendered
//! SVG and stamps `data-icon-rendered`, so a second scan skips it.

use tracing::{debug, warn};

use super::{ATTR_ICON, ATTR_ICON_RENDERED, ATTR_ICON_SIZE, IconRegistry};
use crate::dom::Dom;
use crate::markup::Markup;

/// Pixel size used when a marker does not request one.
pub const DEFAULT_ICON_SIZE: u32 = 24;

/// What happened to one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome<N> {
    /// The icon was rendered into the marker.
    Rendered {
        /// The marker element.
        node: N,
        /// Icon name.
        name: String,
        /// Pixel size used.
        size: u32,
    },
    /// The marker already shows this icon.
    Skipped {
        /// The marker element.
        node: N,
        /// Icon name.
        name: String,
    },
    /// No icon with this name is registered; the marker was left untouched.
    Missing {
        /// The marker element.
        node: N,
        /// Requested name.
        name: String,
    },
}

impl<N> IconOutcome<N> {
    /// The marker element.
    pub const fn node(&self) -> &N {
        match self {
            Self::Rendered { node, .. }
            | Self::Skipped { node, .. }
            | Self::Missing { node, .. } => node,
        }
    }

    /// The requested icon name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rendered { name, .. }
            | Self::Skipped { name, .. }
            | Self::Missing { name, .. } => name,
        }
    }
}

/// Totals for a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Markers rendered by this scan.
    pub rendered: usize,
    /// Markers that were already rendered.
    pub skipped: usize,
    /// Names that could not be resolved, in document order.
    pub missing: Vec<String>,
}

impl ScanSummary {
    /// Whether every marker resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Resolves icon markers against a registry.
#[derive(Debug, Clone)]
pub struct IconScanner<R> {
    registry: R,
}

impl<R: IconRegistry> IconScanner<R> {
    /// Create a scanner over `registry`.
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The backing registry.
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Walk the descendants of `root`, resolving markers as the iterator advances.
    ///
    /// Nothing happens until the iterator is consumed. Children of a marker
    /// are not visited.
    pub fn scan<'a, D: Dom>(&'a self, dom: &'a D, root: &D::Node) -> Scan<'a, D, R> {
        let mut stack = dom.children(root);
        stack.reverse();
        Scan {
            scanner: self,
            dom,
            stack,
        }
    }

    fn resolve<D: Dom>(&self, dom: &D, node: D::Node, name: String) -> IconOutcome<D::Node> {
        if dom.attr(&node, ATTR_ICON_RENDERED).as_deref() == Some(name.as_str()) {
            return IconOutcome::Skipped { node, name };
        }
        let Some(icon) = self.registry.lookup(&name) else {
            warn!(icon = %name, "Unknown icon; marker left untouched");
            return IconOutcome::Missing { node, name };
        };
        let size = requested_size(dom, &node);
        let svg: Markup = icon.render(&name, size).into();
        dom.replace_content(&node, &[svg]);
        dom.set_attr(&node, ATTR_ICON_RENDERED, &name);
        debug!(icon = %name, size, "Icon rendered");
        IconOutcome::Rendered { node, name, size }
    }
}

fn requested_size<D: Dom>(dom: &D, node: &D::Node) -> u32 {
    match dom.attr(node, ATTR_ICON_SIZE) {
        None => DEFAULT_ICON_SIZE,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                warn!(size = %raw, "Invalid icon size; using default");
                DEFAULT_ICON_SIZE
            }
        },
    }
}

/// Lazy depth-first traversal yielding one [`IconOutcome`] per marker.
pub struct Scan<'a, D: Dom, R> {
    scanner: &'a IconScanner<R>,
    dom: &'a D,
    stack: Vec<D::Node>,
}

impl<D: Dom, R: IconRegistry> Scan<'_, D, R> {
    /// Drive the scan to completion and tally the outcomes.
    #[must_use]
    pub fn summary(self) -> ScanSummary {
        self.fold(ScanSummary::default(), |mut summary, outcome| {
            match outcome {
                IconOutcome::Rendered { .. } => summary.rendered += 1,
                IconOutcome::Skipped { .. } => summary.skipped += 1,
                IconOutcome::Missing { name, .. } => summary.missing.push(name),
            }
            summary
        })
    }
}

impl<D: Dom, R: IconRegistry> Iterator for Scan<'_, D, R> {
    type Item = IconOutcome<D::Node>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Some(name) = self.dom.attr(&node, ATTR_ICON) {
                let name = name.trim().to_string();
                return Some(self.scanner.resolve(self.dom, node, name));
            }
            let mut children = self.dom.children(&node);
            children.reverse();
            self.stack.extend(children);
        }
        None
    }
}

impl<D: Dom, R> std::fmt::Debug for Scan<'_, D, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}
