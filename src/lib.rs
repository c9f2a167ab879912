//! Library exports of the arcade rental front-end
//!
//! The binary in `main.rs` only wires these together; tests drive them
//! directly.

pub mod client;
pub mod config;
pub mod container;
pub mod debounce;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod form;
pub mod format;
pub mod handler;
pub mod model;
pub mod notify;
pub mod render;
pub mod route;
pub mod state;
pub mod sync;
pub mod views;
