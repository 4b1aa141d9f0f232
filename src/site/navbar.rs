//! Mobile navigation drawer.

use crate::dom::{
    Document,
    Listener,
};
use crate::types::NodeId;

/// Marks the navigation container.
pub const NAVBAR_ATTRIBUTE: &str = "data-navbar";
/// Marks the buttons that open and close the drawer.
pub const TOGGLER_ATTRIBUTE: &str = "data-nav-toggler";
/// Marks links inside the drawer.
pub const LINK_ATTRIBUTE: &str = "data-nav-link";
/// Marks the backdrop shown behind the open drawer.
pub const OVERLAY_ATTRIBUTE: &str = "data-overlay";

/// Class present on navbar, overlay and togglers while open.
const ACTIVE_CLASS: &str = "active";
/// Class present on `body` while open.
const BODY_OPEN_CLASS: &str = "nav-active";

/// The navigation drawer and the controls around it.
#[derive(Debug, Clone)]
pub struct Navbar {
    /// `[data-navbar]`
    drawer: NodeId,
    /// `[data-overlay]`
    overlay: Option<NodeId>,
    /// `[data-nav-toggler]`
    togglers: Vec<NodeId>,
}

impl Navbar {
    /// Finds the drawer and wires its controls.
    ///
    /// Returns `None` when the document has no `[data-navbar]`.
    pub fn attach(doc: &mut dyn Document) -> Option<Self> {
        let drawer = doc.first_with_attribute(NAVBAR_ATTRIBUTE)?;
        let overlay = doc.first_with_attribute(OVERLAY_ATTRIBUTE);
        let togglers = doc.query_attribute(TOGGLER_ATTRIBUTE);

        for toggler in &togglers {
            doc.add_listener(*toggler, Listener::ToggleNavbar);
        }
        if let Some(overlay) = overlay {
            doc.add_listener(overlay, Listener::ToggleNavbar);
        }
        for link in doc.query_attribute(LINK_ATTRIBUTE) {
            doc.add_listener(link, Listener::CloseNavbar);
        }

        Some(Self { drawer, overlay, togglers })
    }

    /// Whether the drawer is open.
    #[must_use]
    pub fn is_open(&self, doc: &dyn Document) -> bool {
        doc.has_class(self.drawer, ACTIVE_CLASS)
    }

    /// Opens a closed drawer or closes an open one; returns whether it is open.
    pub fn toggle(&self, doc: &mut dyn Document) -> bool {
        let open = !self.is_open(doc);
        self.set_open(doc, open);
        open
    }

    /// Closes the drawer; closing a closed drawer changes nothing.
    pub fn close(&self, doc: &mut dyn Document) {
        self.set_open(doc, false);
    }

    /// Applies the open or closed state to every participating node.
    fn set_open(&self, doc: &mut dyn Document, open: bool) {
        doc.set_class(self.drawer, ACTIVE_CLASS, open);
        if let Some(overlay) = self.overlay {
            doc.set_class(overlay, ACTIVE_CLASS, open);
        }
        for toggler in &self.togglers {
            doc.set_class(*toggler, ACTIVE_CLASS, open);
        }

        // Background scrolling is locked while the drawer is open
        let body = doc.body();
        doc.set_class(body, BODY_OPEN_CLASS, open);
        doc.set_style(body, "overflow", if open { "hidden" } else { "" });

        tracing::debug!(open, "Navbar state changed");
    }
}
