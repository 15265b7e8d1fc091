pub mod auth;
pub mod config;
pub mod error;
pub mod inventory;
pub mod mock;
pub mod models;
pub mod ui;
pub mod waiting_room;

pub use error::{AppError, Result};
