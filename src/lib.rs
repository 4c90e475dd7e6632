#![cfg_attr(not(test), no_std)]

//! Plumbob lamp core
//!
//! Everything here is hardware agnostic and runs on the host:
//! - `domain` - settings record, credentials, errors and ports
//! - `infrastructure` - persistent settings codec and a RAM storage backend
//! - `app` - button classifier, device controller, network retry policy
//! - `net` - HTTP header formatting, request line parsing, DHCP replies
//! - `controllers` - request routing onto the device controller
//!
//! The firmware crate wires these to the ESP32 peripherals.

pub mod app;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod net;

pub use app::{ButtonClassifier, DeviceController};
pub use domain::{
    dto::{ModeParams, SettingsSnapshot},
    entity::{ButtonEvent, Credentials, DeviceState, RestartReason, SettingsRecord},
    ports::{DeviceError, NetworkError, NetworkLink, PersistenceError},
};
pub use infrastructure::{MemoryStorage, SettingsCodec};
