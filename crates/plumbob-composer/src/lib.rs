#![cfg_attr(not(test), no_std)]

//! Plumbob animation engine
//!
//! Architecture layers:
//! - `driver` - Hardware abstraction ([`LedDriver`] trait)
//! - `mode` - The eleven selectable lighting modes ([`ModeId`])
//! - `effect` - Per-mode render functions and their tunables ([`EffectParams`])
//! - `timer` - Per-mode "every N ms" virtual timers
//! - `processor` - Output processing (global brightness, color correction)
//! - `engine` - Owns the pixel buffer and per-mode progress
//!
//! The engine never reads the clock itself; callers pass the current
//! [`embassy_time::Instant`] into every render call.

pub mod color;
pub mod driver;
pub mod effect;
pub mod engine;
pub mod math8;
pub mod mode;
pub mod processor;
pub mod random;
pub mod timer;

// Driver exports
pub use driver::LedDriver;

// Effect exports
pub use effect::{BeatParams, ChaseParams, EffectParams, FireParams, SparkleParams};

// Engine exports
pub use engine::{AnimationEngine, AnimationState};

// Mode exports
pub use mode::ModeId;

// Processor exports
pub use processor::{ColorCorrection, OutputProcessor};

pub use color::Rgb;
