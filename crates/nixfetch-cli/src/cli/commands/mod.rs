//! CLI command handlers, one per file.

mod completions;
mod fetch;
mod man;

pub use completions::run_completions;
pub use fetch::{run_gem, run_git, run_to_base32, run_url};
pub use man::run_man;
