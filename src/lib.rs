//! # Starburst
//!
//! An animated firework-star screensaver rendered with Rust.
//!
//! ## Features
//!
//! - **Star Lifecycle**: Stars grow over half of their lifetime, fade in, rotate and expire
//! - **Color Field**: Position, phase and age drive a smooth sinusoidal RGB field
//! - **Fading Trails**: Every spoke tip leaves a sample that dims over a fixed window
//! - **Population Control**: The live star count drifts toward a periodically re-sampled target
//! - **Software Raster + GPU Present**: Frames are drawn into a CPU canvas and blitted with wgpu
//!
//! ### Example
//!
//! ```no_run
//! use starburst::core::WindowEngine;
//!
//! WindowEngine::run().expect("engine failed");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Engine loop, errors and frame pacing
//! - [`config`]: TOML/JSON configuration with environment overrides
//! - [`particles`]: Stars, spawning, trails and population
//! - [`render`]: Color field, canvas, frame rendering and GPU presentation
//! - [`platform`]: Window and drawing-surface abstractions

/// Core engine functionality including the main engine loop and initialization
pub mod core;
/// Configuration system
pub mod config;
/// Star simulation: lifecycle, spawning, trails and population
pub mod particles;
/// Platform abstraction layer for windows and drawing surfaces
pub mod platform;
/// Rendering: color field, software canvas and GPU presentation
pub mod render;
