//! Asset Registry - Backend Library
//!
//! Internal IT asset inventory: workstations, components, printers, cameras
//! and miscellaneous network equipment.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
