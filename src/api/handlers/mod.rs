//! HTTP request handlers.

pub mod attachments;
pub mod auth;
pub mod cameras;
pub mod components;
pub mod health;
pub mod misc_assets;
pub mod network;
pub mod printers;
pub mod reports;
pub mod workstations;
