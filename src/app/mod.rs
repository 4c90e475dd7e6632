//! Application layer - button, device state machine, network policy

pub mod button;
pub mod controller;
pub mod network;

pub use button::ButtonClassifier;
pub use controller::DeviceController;
pub use network::{associate, associate_forever};
