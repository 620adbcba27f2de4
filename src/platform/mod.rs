//! Platform detection and artifact selection module
//!
//! This module provides abstractions for detecting the current platform
//! (OS and architecture) and mapping it onto the pre-built server artifact
//! published for that platform.

mod detection;
mod table;

pub use detection::{DefaultPlatformDetector, PlatformDetector, PlatformKey};
pub use table::{ARTIFACTS, ArtifactDescriptor, lookup_descriptor};
