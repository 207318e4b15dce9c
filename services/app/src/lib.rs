pub mod adapters;
pub mod ai;
pub mod config;
pub mod error;
pub mod shell;

pub use ai::AiCapability;
pub use config::Config;
pub use error::AppError;
pub use shell::{AppState, SplashTimer};
