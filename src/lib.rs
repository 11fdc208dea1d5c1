pub mod checkout;
pub mod config;
pub mod error;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
