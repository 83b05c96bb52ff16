pub mod config;
pub mod controller;
pub mod cookies;
pub mod errors;
pub mod record;
pub mod tags;
pub mod ui;

pub use controller::*;
