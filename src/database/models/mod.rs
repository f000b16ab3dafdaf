pub mod entry;
pub mod person;

pub(crate) mod macros;

// Re-export all models for easy importing
pub use entry::*;
pub use person::*;
