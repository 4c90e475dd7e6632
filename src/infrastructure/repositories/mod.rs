mod settings_codec;

pub use settings_codec::{SETTINGS_LEN, SettingsCodec, decode_settings, encode_settings};
