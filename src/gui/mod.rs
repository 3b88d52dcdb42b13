//! GUI module - application window and panels

mod app;
mod dashboard;
mod sidebar;

pub use app::DashboardApp;
pub use dashboard::DashboardView;
pub use sidebar::{Sidebar, SidebarAction};
