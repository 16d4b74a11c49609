// src/data/mod.rs
//! GPU-facing data for the card viewer.
//!
//! This module provides:
//! - The vertex and uniform layouts shared with `card.wgsl`.
//! - The card plane geometry.

pub mod mesh;
pub mod types;

// Re-export commonly used types for convenience.
pub use self::types::{CardUniformStd140, CardVertex};
