//! City weather lookup for the terminal
//!
//! This library exposes the application's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod sprites;
pub mod state;
