//! Core type definitions.

pub mod id;
pub mod price;

pub use id::*;
pub use price::*;
