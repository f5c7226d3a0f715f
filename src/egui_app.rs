//! egui user interface: renderer, controller, and shared state types.

pub mod controller;
pub mod state;
pub mod ui;
