//! Attachment storage.
//!
//! Records keep only an opaque path string; everything that touches the
//! filesystem lives here and in the handlers that call it.

pub mod filesystem;

pub use filesystem::FilesystemStore;
