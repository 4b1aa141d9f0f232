//! Navigation dropdown menus.

use crate::dom::{
    Document,
    Listener,
};
use crate::types::NodeId;

/// Class of a dropdown container.
pub const DROPDOWN_CLASS: &str = "modern-dropdown";
/// Class of the control that opens a dropdown.
pub const TRIGGER_CLASS: &str = "dropdown-trigger";
/// Class of the menu a dropdown reveals.
pub const MENU_CLASS: &str = "modern-dropdown-menu";

/// Class present on an open dropdown.
const OPEN_CLASS: &str = "active";

/// Key that closes every dropdown.
const ESCAPE_KEY: &str = "Escape";

/// Dropdowns that close each other.
#[derive(Debug, Clone, Default)]
pub struct DropdownGroup {
    /// Every `.modern-dropdown` in document order.
    dropdowns: Vec<NodeId>,
}

impl DropdownGroup {
    /// Collects the dropdowns and wires the triggers of complete ones.
    ///
    /// A dropdown without both a trigger and a menu is still closed with
    /// the others but cannot be opened.
    pub fn attach(doc: &mut dyn Document) -> Self {
        let dropdowns = doc.query_class(DROPDOWN_CLASS);

        for dropdown in &dropdowns {
            let descendants = doc.descendants(*dropdown);
            let trigger = descendants.iter().copied().find(|n| doc.has_class(*n, TRIGGER_CLASS));
            let has_menu = descendants.iter().any(|n| doc.has_class(*n, MENU_CLASS));

            match trigger {
                Some(trigger) if has_menu => doc.add_listener(trigger, Listener::ToggleDropdown),
                _ => {
                    tracing::debug!(dropdown = %dropdown, "Dropdown without trigger or menu");
                }
            }
        }

        Self { dropdowns }
    }

    /// Every `.dropdown` in the group, in document order.
    #[must_use]
    pub fn dropdowns(&self) -> &[NodeId] {
        &self.dropdowns
    }

    /// Whether `dropdown` is open.
    #[must_use]
    pub fn is_open(doc: &dyn Document, dropdown: NodeId) -> bool {
        doc.has_class(dropdown, OPEN_CLASS)
    }

    /// Toggles the dropdown enclosing `trigger` and closes all others.
    ///
    /// Returns whether it is now open, or `None` when `trigger` is not
    /// inside a dropdown of this group.
    pub fn toggle(&self, doc: &mut dyn Document, trigger: NodeId) -> Option<bool> {
        let dropdown = doc
            .closest_with_class(trigger, DROPDOWN_CLASS)
            .filter(|d| self.dropdowns.contains(d))?;

        for other in self.dropdowns.iter().filter(|d| **d != dropdown) {
            doc.remove_class(*other, OPEN_CLASS);
        }
        Some(doc.toggle_class(dropdown, OPEN_CLASS))
    }

    /// Closes every dropdown of the group.
    pub fn close_all(&self, doc: &mut dyn Document) {
        for dropdown in &self.dropdowns {
            doc.remove_class(*dropdown, OPEN_CLASS);
        }
    }

    /// Closes everything when a click lands outside every dropdown.
    pub fn on_document_click(&self, doc: &mut dyn Document, target: NodeId) {
        if doc.closest_with_class(target, DROPDOWN_CLASS).is_none() {
            self.close_all(doc);
        }
    }

    /// Closes everything on `Escape`.
    pub fn on_key_down(&self, doc: &mut dyn Document, key: &str) {
        if key == ESCAPE_KEY {
            self.close_all(doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::dom::{
        Element,
        NodeRegistry,
    };
    use crate::test_utils::sample_page;

    #[googletest::test]
    fn test_attach_wires_only_complete_dropdowns() {
        let mut doc = NodeRegistry::new();
        let body = doc.body();
        let complete = doc.append(body, Element::new("div").class(DROPDOWN_CLASS));
        let trigger = doc.append(complete, Element::new("a").class(TRIGGER_CLASS));
        doc.append(complete, Element::new("ul").class(MENU_CLASS));
        let incomplete = doc.append(body, Element::new("div").class(DROPDOWN_CLASS));
        let lone_trigger = doc.append(incomplete, Element::new("a").class(TRIGGER_CLASS));

        let group = DropdownGroup::attach(&mut doc);

        expect_that!(group.dropdowns().len(), eq(2));
        expect_that!(doc.listeners(trigger).len(), eq(1));
        expect_that!(doc.listeners(lone_trigger).is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_toggle_closes_others() {
        let (mut doc, nodes) = sample_page();
        let group = DropdownGroup::attach(&mut doc);

        expect_that!(group.toggle(&mut doc, nodes.dropdown_trigger), some(eq(true)));
        expect_that!(group.toggle(&mut doc, nodes.second_trigger), some(eq(true)));
        expect_that!(DropdownGroup::is_open(&doc, nodes.dropdown), eq(false));
        expect_that!(DropdownGroup::is_open(&doc, nodes.second_dropdown), eq(true));

        expect_that!(group.toggle(&mut doc, nodes.second_trigger), some(eq(false)));
        expect_that!(DropdownGroup::is_open(&doc, nodes.second_dropdown), eq(false));
    }

    #[googletest::test]
    fn test_toggle_outside_group() {
        let (mut doc, nodes) = sample_page();
        let group = DropdownGroup::attach(&mut doc);

        expect_that!(group.toggle(&mut doc, nodes.hero_title), none());
    }

    #[googletest::test]
    fn test_outside_click_closes_all() {
        let (mut doc, nodes) = sample_page();
        let group = DropdownGroup::attach(&mut doc);
        group.toggle(&mut doc, nodes.dropdown_trigger);

        // Inside the open dropdown: stays open
        group.on_document_click(&mut doc, nodes.dropdown);
        expect_that!(DropdownGroup::is_open(&doc, nodes.dropdown), eq(true));

        group.on_document_click(&mut doc, nodes.hero_title);
        expect_that!(DropdownGroup::is_open(&doc, nodes.dropdown), eq(false));
    }

    #[rstest]
    #[case("Escape", false)]
    #[case("Enter", true)]
    #[case("escape", true)]
    fn test_key_down(#[case] key: &str, #[case] stays_open: bool) {
        let (mut doc, nodes) = sample_page();
        let group = DropdownGroup::attach(&mut doc);
        group.toggle(&mut doc, nodes.dropdown_trigger);

        group.on_key_down(&mut doc, key);

        assert_eq!(DropdownGroup::is_open(&doc, nodes.dropdown), stays_open);
    }
}
