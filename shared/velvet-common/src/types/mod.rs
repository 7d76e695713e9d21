//! Shared Types

pub mod access;
pub mod participant;
pub mod privacy;

pub use access::*;
pub use participant::*;
pub use privacy::*;
