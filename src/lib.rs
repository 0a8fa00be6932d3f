pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::HttpFantasyApi;
pub use config::FplConfig;
pub use crate::core::{engine::TransferEngine, session::AuthenticatedSession};
pub use utils::error::{Result, TransferError};
