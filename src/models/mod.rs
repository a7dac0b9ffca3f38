//! Database models (SQLx).

pub mod camera;
pub mod component;
pub mod misc_asset;
pub mod printer;
pub mod user;
pub mod workstation;
