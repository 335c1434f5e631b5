//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod form;
pub mod list;
pub mod search;

pub use form::render_form;
pub use list::render_list;
pub use search::render_search;
