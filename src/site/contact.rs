//! Contact form that hands the message to the visitor's mail client.

use percent_encoding::{
    AsciiSet,
    NON_ALPHANUMERIC,
    utf8_percent_encode,
};

use crate::dom::{
    Document,
    Element,
};
use crate::types::NodeId;

/// `id` of the contact form.
pub const FORM_ID: &str = "contactForm";
/// Class of the confirmation shown after a submission.
pub const SUCCESS_CLASS: &str = "form-success-message";
/// Class of a failure message; cleared together with confirmations.
pub const ERROR_CLASS: &str = "form-error-message";
/// Confirmation text.
pub const SUCCESS_TEXT: &str = "Thank you for your message! Your email client should open now.";

/// Characters `encodeURIComponent` leaves as they are, besides alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fields of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender address, written into the body.
    pub email: String,
    /// Mail subject.
    pub subject: String,
    /// Free text.
    pub message: String,
}

impl ContactMessage {
    /// Reads the `value` of the named fields under `form`.
    ///
    /// Absent fields read as empty.
    #[must_use]
    pub fn from_form(doc: &dyn Document, form: NodeId) -> Self {
        let fields = doc.descendants(form);
        let field = |name: &str| {
            fields
                .iter()
                .find(|node| doc.attribute(**node, "name") == Some(name))
                .and_then(|node| doc.attribute(*node, "value"))
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    /// Mail body listing the sender before the message.
    #[must_use]
    pub fn body(&self) -> String {
        format!("Name: {}\nEmail: {}\n\nMessage:\n{}", self.name, self.email, self.message)
    }
}

/// Builds `mailto:<recipient>?subject=..&body=..` with URI-component encoding.
///
/// # Examples
/// ```
/// use site_i18n::site::contact::{ContactMessage, build_mailto};
///
/// let message = ContactMessage {
///     name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     subject: "Hello there".to_string(),
///     message: "Hi!".to_string(),
/// };
///
/// assert_eq!(
///     build_mailto("team@example.com", &message),
///     "mailto:team@example.com?subject=Hello%20there&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0AHi!"
/// );
/// ```
#[must_use]
pub fn build_mailto(recipient: &str, message: &ContactMessage) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        utf8_percent_encode(&message.subject, URI_COMPONENT),
        utf8_percent_encode(&message.body(), URI_COMPONENT)
    )
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Navigation target handed to the mail client.
    pub mailto: String,
    /// The confirmation node inserted before the form.
    pub message_node: NodeId,
}

/// The contact form controller.
#[derive(Debug, Clone)]
pub struct ContactForm {
    /// `#contactForm`
    form: NodeId,
    /// Address every message is sent to.
    recipient: String,
}

impl ContactForm {
    /// Finds `#contactForm`; `None` when the page has no contact form.
    #[must_use]
    pub fn attach(doc: &dyn Document, recipient: impl Into<String>) -> Option<Self> {
        let form = doc.element_by_id(FORM_ID)?;
        Some(Self { form, recipient: recipient.into() })
    }

    /// The `#contactForm` node.
    #[must_use]
    pub const fn form(&self) -> NodeId {
        self.form
    }

    /// Builds the mail link, shows the confirmation and clears the fields.
    pub fn submit(&self, doc: &mut dyn Document) -> Submission {
        let message = ContactMessage::from_form(doc, self.form);
        let mailto = build_mailto(&self.recipient, &message);
        let message_node = self.show_confirmation(doc);
        self.reset(doc);

        tracing::debug!(form = %self.form, "Contact form submitted");
        Submission { mailto, message_node }
    }

    /// Replaces any form message with a fresh confirmation before the form.
    fn show_confirmation(&self, doc: &mut dyn Document) -> NodeId {
        let mut existing = doc.query_class(SUCCESS_CLASS);
        existing.extend(doc.query_class(ERROR_CLASS));
        for node in existing {
            doc.remove(node);
        }

        let parent = doc.parent(self.form).unwrap_or_else(|| doc.body());
        let node = doc.insert(
            parent,
            Some(self.form),
            Element::new("div").class(SUCCESS_CLASS).text(SUCCESS_TEXT),
        );
        doc.set_style(node, "display", "block");
        node
    }

    /// Clears the `value` of every named field.
    fn reset(&self, doc: &mut dyn Document) {
        for node in doc.descendants(self.form) {
            if doc.attribute(node, "name").is_some() {
                doc.set_attribute(node, "value", "");
            }
        }
    }
}

/// Hides a form message that is still on the page.
pub fn hide_message(doc: &mut dyn Document, node: NodeId) {
    if doc.is_attached(node) {
        doc.set_style(node, "display", "none");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::dom::NodeRegistry;
    use crate::test_utils::sample_page;

    /// Fills the sample contact form.
    fn fill(doc: &mut NodeRegistry, form: NodeId, values: [(&str, &str); 4]) {
        for node in doc.descendants(form) {
            let name = doc.attribute(node, "name").map(ToString::to_string);
            if let Some((_, value)) = values.iter().find(|(field, _)| Some(*field) == name.as_deref())
            {
                doc.set_attribute(node, "value", value);
            }
        }
    }

    #[rstest]
    #[case("Hello there", "Hello%20there")]
    #[case("a&b=c?", "a%26b%3Dc%3F")]
    #[case("Café", "Caf%C3%A9")]
    #[case("-_.!~*'()", "-_.!~*'()")]
    fn test_encodes_like_uri_component(#[case] subject: &str, #[case] encoded: &str) {
        let message = ContactMessage { subject: subject.to_string(), ..ContactMessage::default() };

        let mailto = build_mailto("team@example.com", &message);

        assert!(mailto.starts_with(&format!("mailto:team@example.com?subject={encoded}&body=")));
    }

    #[rstest]
    fn test_body_layout() {
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: String::new(),
            message: "Line one\nLine two".to_string(),
        };

        assert_eq!(
            message.body(),
            "Name: Ada\nEmail: ada@example.com\n\nMessage:\nLine one\nLine two"
        );
    }

    #[googletest::test]
    fn test_submit_reads_fields_and_resets() {
        let (mut doc, nodes) = sample_page();
        fill(
            &mut doc,
            nodes.contact_form,
            [("name", "Ada"), ("email", "ada@example.com"), ("subject", "Quote"), ("message", "Hi")],
        );
        let form = ContactForm::attach(&doc, "nexorawebdev@gmail.com").unwrap();

        let submission = form.submit(&mut doc);

        expect_that!(
            submission.mailto.as_str(),
            eq("mailto:nexorawebdev@gmail.com?subject=Quote&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0AHi")
        );
        let cleared = ContactMessage::from_form(&doc, nodes.contact_form);
        assert_eq!(cleared, ContactMessage::default());
    }

    #[googletest::test]
    fn test_confirmation_is_inserted_before_form() {
        let (mut doc, nodes) = sample_page();
        let form = ContactForm::attach(&doc, "team@example.com").unwrap();

        let Submission { message_node, .. } = form.submit(&mut doc);

        let parent = doc.parent(nodes.contact_form).unwrap();
        let siblings = doc.descendants(parent);
        let message_pos = siblings.iter().position(|n| *n == message_node);
        let form_pos = siblings.iter().position(|n| *n == nodes.contact_form);
        expect_that!(message_pos, some(eq(0)));
        expect_that!(form_pos, some(eq(1)));
        expect_that!(doc.text(message_node), some(eq(SUCCESS_TEXT)));
        expect_that!(doc.style(message_node, "display"), some(eq("block")));
    }

    #[googletest::test]
    fn test_resubmit_replaces_previous_message() {
        let (mut doc, _) = sample_page();
        let form = ContactForm::attach(&doc, "team@example.com").unwrap();

        let first = form.submit(&mut doc);
        let second = form.submit(&mut doc);

        expect_that!(doc.is_attached(first.message_node), eq(false));
        expect_that!(doc.is_attached(second.message_node), eq(true));
        expect_that!(doc.query_class(SUCCESS_CLASS).len(), eq(1));
    }

    #[googletest::test]
    fn test_hide_message() {
        let (mut doc, _) = sample_page();
        let form = ContactForm::attach(&doc, "team@example.com").unwrap();
        let submission = form.submit(&mut doc);

        hide_message(&mut doc, submission.message_node);

        expect_that!(doc.style(submission.message_node, "display"), some(eq("none")));
    }

    #[googletest::test]
    fn test_page_without_form() {
        let doc = NodeRegistry::new();

        expect_that!(ContactForm::attach(&doc, "team@example.com").is_none(), eq(true));
    }
}
