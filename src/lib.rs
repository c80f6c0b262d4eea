//! Emergency incident dispatch tracker
//!
//! Operators register emergencies against a shared pool of response
//! resources, review them and resolve them. State is held in memory for the
//! lifetime of a session only.

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod render;
pub mod session;
pub mod tracker;

pub use error::{AppError, Result};
