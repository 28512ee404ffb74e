//! CLI command handlers, one file per command.

mod add;
mod categories;
mod check;
mod completions;
mod list;
mod remove;
mod visit;

pub use add::run_add;
pub use categories::run_categories;
pub use check::run_check;
pub use completions::run_completions;
pub use list::run_list;
pub use remove::run_remove;
pub use visit::run_visit;
