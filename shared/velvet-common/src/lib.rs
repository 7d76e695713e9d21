//! Velvet Common Library
//!
//! Wire types shared between the server and its clients.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
