//! Command controller

pub mod controller;
pub mod state;

pub use controller::{AppController, AppHandle};
pub use state::{AppCommand, AppSnapshot};
