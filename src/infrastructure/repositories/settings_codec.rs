//! Fixed-offset settings and credential persistence.
//!
//! Layout of the reserved region:
//!
//! | Offset | Content |
//! |---|---|
//! | 0 | configured flag |
//! | 1 | network name length, name from 2 |
//! | 63 | passphrase length, passphrase from 64 |
//! | 128 | settings record, see [`visit_fields`] |
//!
//! 16-bit fields are big-endian. RGB triples are three 16-bit fields.
//! There is no header or version; fields may only be appended.

use embedded_storage::Storage;
use plumbob_composer::Rgb;

use crate::{
    config::{
        CONFIGURED_FLAG_OFFSET,
        PASSWORD_LENGTH_OFFSET,
        PASSWORD_OFFSET,
        SETTINGS_OFFSET,
        SSID_LENGTH_OFFSET,
        SSID_OFFSET,
        STORAGE_SIZE,
    },
    domain::{
        entity::{Credentials, SettingsRecord},
        ports::PersistenceError,
    },
};

/// Encoded size of [`SettingsRecord`]
pub const SETTINGS_LEN: usize = 41;

/// Size of the credential head preceding the settings
const CREDENTIALS_LEN: usize = SETTINGS_OFFSET as usize;

const CONFIGURED: u8 = 1;

/// One access per field, in layout order.
trait FieldAccess {
    fn u8(&mut self, value: &mut u8);
    fn u16(&mut self, value: &mut u16);
    fn flag(&mut self, value: &mut bool);

    fn rgb(&mut self, value: &mut Rgb) {
        for channel in [&mut value.r, &mut value.g, &mut value.b] {
            let mut wide = u16::from(*channel);
            self.u16(&mut wide);
            *channel = u8::try_from(wide).unwrap_or(u8::MAX);
        }
    }
}

/// The settings layout. Encoding and decoding both walk this list.
fn visit_fields(record: &mut SettingsRecord, access: &mut impl FieldAccess) {
    access.u16(&mut record.brightness);
    access.u8(&mut record.mode);
    access.flag(&mut record.enabled);

    let effects = &mut record.effects;
    access.u16(&mut effects.full_rainbow_speed);
    access.u16(&mut effects.animated_rainbow_speed);
    access.u16(&mut effects.chase.hue);
    access.u16(&mut effects.chase.speed);
    access.u16(&mut effects.animated_palette_speed);
    access.u16(&mut effects.sparkle.speed);
    access.u16(&mut effects.sparkle.fade);
    access.u16(&mut effects.beat.bpm);
    access.u16(&mut effects.beat.fade);
    access.rgb(&mut effects.beat.color);
    access.u16(&mut effects.fire.speed);
    access.u16(&mut effects.fire.cooling);
    access.u16(&mut effects.fire.sparks);
    access.flag(&mut effects.fire.reverse);
    access.rgb(&mut effects.static_color);
}

struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl FieldAccess for FieldWriter<'_> {
    fn u8(&mut self, value: &mut u8) {
        self.buf[self.pos] = *value;
        self.pos += 1;
    }

    fn u16(&mut self, value: &mut u16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&value.to_be_bytes());
        self.pos += 2;
    }

    fn flag(&mut self, value: &mut bool) {
        self.u8(&mut u8::from(*value));
    }
}

struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl FieldAccess for FieldReader<'_> {
    fn u8(&mut self, value: &mut u8) {
        *value = self.buf[self.pos];
        self.pos += 1;
    }

    fn u16(&mut self, value: &mut u16) {
        *value = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
    }

    fn flag(&mut self, value: &mut bool) {
        *value = self.buf[self.pos] == 1;
        self.pos += 1;
    }
}

/// Serialize a record into its fixed-size image
pub fn encode_settings(record: &SettingsRecord) -> [u8; SETTINGS_LEN] {
    let mut buf = [0u8; SETTINGS_LEN];
    let mut record = *record;
    visit_fields(&mut record, &mut FieldWriter { buf: &mut buf, pos: 0 });
    buf
}

/// Inverse of [`encode_settings`]. Values are not range checked.
pub fn decode_settings(buf: &[u8; SETTINGS_LEN]) -> SettingsRecord {
    let mut record = SettingsRecord::new();
    visit_fields(&mut record, &mut FieldReader { buf, pos: 0 });
    record
}

/// Settings and credential store on top of a byte-addressed storage.
///
/// Every save is a single `write` call, so a commit is all or nothing as
/// far as the storage driver guarantees it.
pub struct SettingsCodec<S: Storage> {
    storage: S,
}

impl<S: Storage> SettingsCodec<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Write the whole settings record in one commit.
    pub fn save(&mut self, record: &SettingsRecord) -> Result<(), PersistenceError> {
        self.write(SETTINGS_OFFSET, &encode_settings(record))?;
        log::debug!("storage: settings saved");
        Ok(())
    }

    /// Read the settings record back.
    pub fn load(&mut self) -> Result<SettingsRecord, PersistenceError> {
        let mut buf = [0u8; SETTINGS_LEN];
        self.read(SETTINGS_OFFSET, &mut buf)?;
        Ok(decode_settings(&buf))
    }

    /// Zero the entire reserved region, credentials included.
    pub fn erase_all(&mut self) -> Result<(), PersistenceError> {
        self.write(0, &[0u8; STORAGE_SIZE])?;
        log::info!("storage: reserved region erased");
        Ok(())
    }

    /// Whether a credential pair has been stored
    pub fn read_configured_flag(&mut self) -> Result<bool, PersistenceError> {
        let mut flag = [0u8; 1];
        self.read(CONFIGURED_FLAG_OFFSET, &mut flag)?;
        Ok(flag[0] == CONFIGURED)
    }

    /// Load the stored credentials.
    ///
    /// Returns `None` when the flag is not set or the stored bytes do not
    /// form a valid pair.
    pub fn load_credentials(&mut self) -> Result<Option<Credentials>, PersistenceError> {
        let mut head = [0u8; CREDENTIALS_LEN];
        self.read(0, &mut head)?;
        if head[CONFIGURED_FLAG_OFFSET as usize] != CONFIGURED {
            return Ok(None);
        }

        let ssid = stored_str(&head, SSID_LENGTH_OFFSET, SSID_OFFSET, PASSWORD_LENGTH_OFFSET);
        let password = stored_str(&head, PASSWORD_LENGTH_OFFSET, PASSWORD_OFFSET, SETTINGS_OFFSET);
        Ok(ssid
            .zip(password)
            .and_then(|(ssid, password)| Credentials::new(ssid, password)))
    }

    /// Store a credential pair and set the configured flag in one commit.
    ///
    /// Settings bytes are left untouched.
    pub fn save_credentials(&mut self, credentials: &Credentials) -> Result<(), PersistenceError> {
        let mut head = [0u8; CREDENTIALS_LEN];
        head[CONFIGURED_FLAG_OFFSET as usize] = CONFIGURED;
        put_str(&mut head, SSID_LENGTH_OFFSET, SSID_OFFSET, &credentials.ssid);
        put_str(&mut head, PASSWORD_LENGTH_OFFSET, PASSWORD_OFFSET, &credentials.password);
        self.write(0, &head)?;
        log::info!("storage: credentials saved for {}", credentials.ssid.as_str());
        Ok(())
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), PersistenceError> {
        self.check_capacity()?;
        self.storage
            .read(offset, buf)
            .map_err(|_| PersistenceError::DriverError)
    }

    fn write(&mut self, offset: u32, buf: &[u8]) -> Result<(), PersistenceError> {
        self.check_capacity()?;
        self.storage
            .write(offset, buf)
            .map_err(|_| PersistenceError::DriverError)
    }

    fn check_capacity(&self) -> Result<(), PersistenceError> {
        if self.storage.capacity() < STORAGE_SIZE {
            return Err(PersistenceError::OutOfBounds);
        }
        Ok(())
    }
}

/// Length-prefixed string at `start`, bounded by `end`.
///
/// Older images count a NUL terminator in the length; one trailing NUL is
/// dropped.
fn stored_str(head: &[u8], len_offset: u32, start: u32, end: u32) -> Option<&str> {
    let len = usize::from(head[len_offset as usize]);
    let start = start as usize;
    if start + len > end as usize {
        return None;
    }
    let bytes = &head[start..start + len];
    let bytes = bytes.strip_suffix(&[0]).unwrap_or(bytes);
    core::str::from_utf8(bytes).ok()
}

#[allow(clippy::cast_possible_truncation)]
fn put_str(head: &mut [u8], len_offset: u32, start: u32, value: &str) {
    let bytes = value.as_bytes();
    let start = start as usize;
    head[len_offset as usize] = bytes.len() as u8;
    head[start..start + bytes.len()].copy_from_slice(bytes);
}
