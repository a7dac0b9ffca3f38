//! API middleware.

pub mod session;
