// src/lib.rs
//! Holographic trading-card preview library.
//!
//! This library wires the `card_shading` core into a winit window: a wgpu
//! pipeline runs the rarity shader on the card plane, the motion integrator
//! tilts the card toward the pointer, and an egui panel picks the rarity.

pub mod app;
pub mod assets;
pub mod camera;
pub mod card;
pub mod config;
pub mod data;
pub mod renderer;
pub mod snapshot;
pub mod ui;
