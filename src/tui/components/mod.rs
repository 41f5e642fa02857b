//! UI components for the TUI.
//!
//! # Component Organization
//!
//! - `section_bar` - Section tabs along the top
//! - `topic_list` - Topic rows for the current section
//! - `post_stream` - Posts of the open topic, with cloaked placeholders
//! - `categories` - Category summaries
//! - `status_line` - Status messages, pending chords, search and composer
//! - `help_popup` - Help overlay listing the active keymap

mod categories;
mod help_popup;
mod post_stream;
mod section_bar;
mod status_line;
mod topic_list;

// Re-export all render functions for use in ui.rs
pub use categories::render_categories;
pub use help_popup::render_help_popup;
pub use post_stream::render_post_stream;
pub use section_bar::render_section_bar;
pub use status_line::render_status_line;
pub use topic_list::render_topic_list;
