//! GUI panels and application state.

pub mod app;
pub mod call_panel;
pub mod components;
pub mod dashboard;
pub mod inventory_panel;
pub mod login;
pub mod waiting_room_display;

pub use app::App;
