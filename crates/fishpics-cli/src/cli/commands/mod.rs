//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod normalize;
mod run;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use normalize::run_normalize;
pub use run::run_pipeline;
