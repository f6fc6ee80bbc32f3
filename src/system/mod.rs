pub mod error;
pub mod platform;
pub mod procfs;
pub mod snapshot;
pub mod source;
