//! Page behavior driven through a [`Document`](crate::dom::Document).

pub mod contact;
pub mod dropdown;
pub mod header;
pub mod navbar;
pub mod router;
pub mod splash;
pub mod timers;

pub use contact::{
    ContactForm,
    ContactMessage,
    Submission,
    build_mailto,
};
pub use dropdown::DropdownGroup;
pub use header::ScrollHeader;
pub use navbar::Navbar;
pub use router::{
    Event,
    Site,
};
pub use splash::{
    Splash,
    SplashState,
};
pub use timers::{
    TimerAction,
    TimerQueue,
};
