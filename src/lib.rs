pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::Repository;
pub use config::Settings;
pub use utils::error::{Result, RibbitError};
pub use view::Renderer;
pub use web::{router, AppState};
