pub mod activity;
pub mod app;
pub mod filter;
pub mod grouping;
pub mod pinned;
pub mod render;
pub mod reporter;
pub mod stats;

pub use app::{AppState, Command, PipelineOutcome};
pub use filter::{FilterState, PinnedSelect};
