//! Business logic services.

pub mod camera_service;
pub mod component_service;
pub mod misc_asset_service;
pub mod network_service;
pub mod printer_service;
pub mod report_service;
pub mod session_service;
pub mod workstation_service;
