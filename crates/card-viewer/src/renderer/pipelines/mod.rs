//! Render pass pipelines.

pub mod card;
