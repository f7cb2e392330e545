//! phonespotter library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod camera;
pub mod cli;
pub mod config;
pub mod detect_loop;
pub mod detector;
pub mod devices;
pub mod display;
pub mod interrupt;
pub mod overlay;
pub mod stats;
