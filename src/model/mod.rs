//! Model layer - listing state and the controllers acting on it
//!
//! - `Table` / `TableRow` - records plus the synthetic action panel row
//! - `sort` - hand-sorting engine
//! - `ActionPanelController` - single-open-row panel state machine
//! - `action_panel` - panel rendering
//! - `Grid` - paging, search, typed sort and export filtering
//! - `ResponsiveController` - viewport-driven presentation
//! - `NotificationCenter` / `ModalStack` - overlays

pub mod action_panel;
pub mod context;
pub mod grid;
pub mod modal;
pub mod notification;
pub mod page;
pub mod panel;
pub mod responsive;
pub mod sort;
pub mod table;
pub mod viewport;

pub use context::PageContext;
pub use grid::Grid;
pub use page::{load_page, Page};
pub use panel::ActionPanelController;
pub use table::{ClickTarget, RowId, Table, TableRow};
pub use viewport::ViewportClass;
