//! Header and back-to-top control that appear once the page is scrolled.

use crate::dom::Document;
use crate::types::NodeId;

/// Marks the page header.
pub const HEADER_ATTRIBUTE: &str = "data-header";
/// Marks the back-to-top control.
pub const BACK_TOP_ATTRIBUTE: &str = "data-back-top-btn";

/// Class present on both nodes past the threshold.
const ACTIVE_CLASS: &str = "active";

/// Toggles the header and back-to-top control on scroll.
#[derive(Debug, Clone, Copy)]
pub struct ScrollHeader {
    /// `[data-header]`
    header: Option<NodeId>,
    /// `[data-back-top-btn]`
    back_top: Option<NodeId>,
    /// Offset in pixels that must be exceeded.
    threshold: u32,
}

impl ScrollHeader {
    /// Finds both nodes; either may be absent.
    #[must_use]
    pub fn attach(doc: &dyn Document, threshold: u32) -> Self {
        Self {
            header: doc.first_with_attribute(HEADER_ATTRIBUTE),
            back_top: doc.first_with_attribute(BACK_TOP_ATTRIBUTE),
            threshold,
        }
    }

    /// Offset in pixels that must be exceeded.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Updates both nodes for the vertical scroll `offset`.
    ///
    /// Returns whether they are now active.
    pub fn on_scroll(&self, doc: &mut dyn Document, offset: u32) -> bool {
        let active = offset > self.threshold;
        for node in [self.header, self.back_top].into_iter().flatten() {
            doc.set_class(node, ACTIVE_CLASS, active);
        }
        active
    }
}
