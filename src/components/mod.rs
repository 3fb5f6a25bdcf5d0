//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod cta;
pub mod help_dialog;
pub mod layout;
pub mod listing;
pub mod navbar;
pub mod notifications;

pub use confirm_dialog::ConfirmDialog;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
pub use listing::{draw_listing_screen, ListingComponent, ListingRenderContext};
pub use navbar::NavbarComponent;
