//! UI Components
//!
//! Reusable Leptos components.

mod category_list;
mod delete_confirm_button;
mod drop_zone;
mod header_bar;
mod log_panel;
mod project_brief_page;
mod quiz_page;
mod recipe_dialog;
mod recipe_grid;
mod sql_page;
mod status_banner;

pub use category_list::CategoryList;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drop_zone::{DropZone, DropZoneProps};
pub use header_bar::HeaderBar;
pub use log_panel::LogPanel;
pub use project_brief_page::ProjectBriefPage;
pub use quiz_page::QuizPage;
pub use recipe_dialog::RecipeDialog;
pub use recipe_grid::RecipeGrid;
pub use sql_page::SqlPage;
pub use status_banner::StatusBanner;
