//! fsjail-core: shared types and capability detection for fsjail
//!
//! This crate provides the foundational pieces used by the fsjail crates:
//! - Error types and Result alias
//! - Runtime detection of Landlock support

pub mod capabilities;
pub mod error;

pub use capabilities::SystemCapabilities;
pub use error::{JailError, Result};
