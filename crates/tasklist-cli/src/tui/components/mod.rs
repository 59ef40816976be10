//! TUI components.

pub mod categories;
pub mod form;
pub mod search;
pub mod task_list;
