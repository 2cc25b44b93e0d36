pub mod error;
pub mod format;
pub mod service;
pub mod source;
