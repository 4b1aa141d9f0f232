//! One-shot splash screen.

use crate::dom::Document;
use crate::types::NodeId;

/// Marks the splash screen node.
pub const SPLASH_ATTRIBUTE: &str = "data-splash";

/// Class added when the splash starts fading.
pub const FADE_CLASS: &str = "fade-out";

/// Where the splash is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashState {
    /// Shown, waiting for a dismissal.
    Pending,
    /// Fading out, still attached.
    Fading,
    /// Removed, or never present.
    Done,
}

/// The splash screen shown while the page loads.
#[derive(Debug, Clone, Copy)]
pub struct Splash {
    /// `[data-splash]`
    node: Option<NodeId>,
    /// Current lifecycle stage.
    state: SplashState,
}

impl Splash {
    /// Finds `[data-splash]`; a page without one starts out `Done`.
    #[must_use]
    pub fn attach(doc: &dyn Document) -> Self {
        let node = doc.first_with_attribute(SPLASH_ATTRIBUTE);
        let state = if node.is_some() { SplashState::Pending } else { SplashState::Done };
        Self { node, state }
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn state(&self) -> SplashState {
        self.state
    }

    /// Starts the fade. Returns `true` only for the call that started it.
    pub fn dismiss(&mut self, doc: &mut dyn Document) -> bool {
        let (SplashState::Pending, Some(node)) = (self.state, self.node) else {
            return false;
        };
        doc.add_class(node, FADE_CLASS);
        self.state = SplashState::Fading;
        tracing::debug!("Splash dismissed");
        true
    }

    /// Detaches the splash node.
    pub fn remove(&mut self, doc: &mut dyn Document) {
        if let Some(node) = self.node
            && self.state != SplashState::Done
        {
            doc.remove(node);
        }
        self.state = SplashState::Done;
    }
}
