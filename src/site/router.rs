//! Routes page events to the translation store and the page controllers.

use std::time::Duration;

use super::contact::{
    ContactForm,
    hide_message,
};
use super::dropdown::DropdownGroup;
use super::header::ScrollHeader;
use super::navbar::Navbar;
use super::splash::Splash;
use super::timers::{
    TimerAction,
    TimerQueue,
};
use crate::config::PageSettings;
use crate::dom::{
    Document,
    Listener,
};
use crate::i18n::store::TranslationStore;
use crate::storage::PreferenceStore;
use crate::types::NodeId;

/// Something the visitor or the host did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Click on a node; bubbles towards `body`.
    Click(NodeId),
    /// Key press anywhere on the page.
    KeyDown(String),
    /// Vertical scroll offset in pixels.
    Scroll(u32),
    /// Submission of a form.
    Submit(NodeId),
    /// Virtual time passing.
    Tick(Duration),
}

/// A page with its translation store, controllers and timers.
#[derive(Debug)]
pub struct Site<D: Document, S: PreferenceStore> {
    /// The page every controller mutates.
    doc: D,
    /// Where the language preference persists.
    storage: S,
    /// Active language and translations.
    store: TranslationStore,
    /// Timeouts, scroll threshold and contact recipient.
    page: PageSettings,
    /// `None` on pages without `[data-navbar]`.
    navbar: Option<Navbar>,
    /// Every `.modern-dropdown`.
    dropdowns: DropdownGroup,
    /// Scroll-activated header.
    header: ScrollHeader,
    /// One-shot splash screen.
    splash: Splash,
    /// `None` on pages without `#contactForm`.
    contact: Option<ContactForm>,
    /// Virtual clock with pending timers.
    timers: TimerQueue,
    /// Every navigation target, oldest first.
    navigations: Vec<String>,
    /// Set once [`start`](Self::start) has run.
    started: bool,
}

impl<D: Document, S: PreferenceStore> Site<D, S> {
    /// Attaches every controller to `doc`.
    pub fn new(mut doc: D, storage: S, store: TranslationStore, page: PageSettings) -> Self {
        let navbar = Navbar::attach(&mut doc);
        let dropdowns = DropdownGroup::attach(&mut doc);
        let header = ScrollHeader::attach(&doc, page.scroll_threshold);
        let splash = Splash::attach(&doc);
        let contact = ContactForm::attach(&doc, page.contact_recipient.clone());

        tracing::debug!(
            navbar = navbar.is_some(),
            dropdowns = dropdowns.dropdowns().len(),
            contact = contact.is_some(),
            "Page controllers attached"
        );

        Self {
            doc,
            storage,
            store,
            page,
            navbar,
            dropdowns,
            header,
            splash,
            contact,
            timers: TimerQueue::new(),
            navigations: Vec::new(),
            started: false,
        }
    }

    /// Applies the preferred language and starts the splash timeout.
    ///
    /// Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if let Some(report) = self.store.initialize(&mut self.doc, &mut self.storage) {
            tracing::info!(
                language = %self.store.active_language(),
                updated = report.updated,
                missing = report.missing.len(),
                "Page translated"
            );
        }
        self.timers.schedule(
            Duration::from_millis(self.page.splash_timeout_ms),
            TimerAction::DismissSplash,
        );
    }

    /// Handles one event to completion.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Click(target) => {
                self.dismiss_splash();
                self.click(target);
            }
            Event::KeyDown(key) => {
                self.dismiss_splash();
                self.dropdowns.on_key_down(&mut self.doc, &key);
            }
            Event::Scroll(offset) => {
                self.header.on_scroll(&mut self.doc, offset);
            }
            Event::Submit(form) => self.submit(form),
            Event::Tick(elapsed) => self.tick(elapsed),
        }
    }

    /// Runs click listeners from `target` up to `body`, then the page-level handler.
    fn click(&mut self, target: NodeId) {
        if !self.doc.is_attached(target) {
            tracing::debug!(%target, "Click on detached node ignored");
            return;
        }

        let mut propagation_stopped = false;
        for node in self.doc.ancestors_inclusive(target) {
            for listener in self.doc.listeners(node).to_vec() {
                propagation_stopped |= self.run_listener(node, &listener);
            }
            if propagation_stopped {
                break;
            }
        }

        if !propagation_stopped {
            self.dropdowns.on_document_click(&mut self.doc, target);
        }
    }

    /// Runs one listener attached to `node`; returns whether it stops propagation.
    fn run_listener(&mut self, node: NodeId, listener: &Listener) -> bool {
        match listener {
            Listener::SwitchLanguage(language) => {
                self.store.switch_language(&mut self.doc, &mut self.storage, language);
                false
            }
            Listener::ToggleNavbar => {
                if let Some(navbar) = &self.navbar {
                    navbar.toggle(&mut self.doc);
                }
                false
            }
            Listener::CloseNavbar => {
                if let Some(navbar) = &self.navbar {
                    navbar.close(&mut self.doc);
                }
                false
            }
            Listener::ToggleDropdown => {
                self.dropdowns.toggle(&mut self.doc, node);
                true
            }
        }
    }

    /// Sends the contact form through the mail client and schedules hiding the confirmation.
    fn submit(&mut self, form: NodeId) {
        let Some(contact) = self.contact.as_ref().filter(|c| c.form() == form) else {
            tracing::debug!(%form, "Submit on unhandled form ignored");
            return;
        };

        let submission = contact.submit(&mut self.doc);
        tracing::info!(mailto = %submission.mailto, "Navigating to mail client");
        self.navigations.push(submission.mailto);
        self.timers.schedule(
            Duration::from_millis(self.page.message_timeout_ms),
            TimerAction::HideFormMessage(submission.message_node),
        );
    }

    /// Starts the splash fade and schedules its removal.
    fn dismiss_splash(&mut self) {
        if self.splash.dismiss(&mut self.doc) {
            self.timers
                .schedule(Duration::from_millis(self.page.splash_fade_ms), TimerAction::RemoveSplash);
        }
    }

    /// Advances the clock by `elapsed`, firing due timers in order.
    fn tick(&mut self, elapsed: Duration) {
        let until = self.timers.now().saturating_add(elapsed);
        while let Some(action) = self.timers.pop_due(until) {
            match action {
                TimerAction::DismissSplash => self.dismiss_splash(),
                TimerAction::RemoveSplash => self.splash.remove(&mut self.doc),
                TimerAction::HideFormMessage(node) => hide_message(&mut self.doc, node),
            }
        }
        self.timers.advance_to(until);
    }

    /// The page document.
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable access for host-side edits such as typing into form fields.
    pub const fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// The preference store backing the language choice.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The translation store.
    #[must_use]
    pub const fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// The splash controller.
    #[must_use]
    pub const fn splash(&self) -> &Splash {
        &self.splash
    }

    /// Current virtual time since the page was created.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Every `mailto:` URL navigated to, oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// The most recent navigation, if any.
    #[must_use]
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }
}
