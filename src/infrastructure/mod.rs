//! Infrastructure layer - storage backends and the settings codec

pub mod drivers;
pub mod repositories;

pub use drivers::MemoryStorage;
pub use repositories::SettingsCodec;
