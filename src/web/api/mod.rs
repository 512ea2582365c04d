pub mod document;
pub mod epochs;
pub mod error;
pub mod now;
pub mod types;
