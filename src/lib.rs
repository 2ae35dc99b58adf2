pub mod app;
pub mod config;
pub mod display;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod poller;
pub mod render;
pub mod source;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use display::{DisplaySurface, SharedDisplay};
pub use poller::{run_cycle, CycleOutcome, Poller};
pub use source::{HttpSource, PostureSource};
pub use state::{AppState, PollerStats};
