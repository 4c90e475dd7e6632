use super::entity::Credentials;

/// Error type for the persistence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceError {
    /// The storage driver rejected a read or write
    DriverError,
    /// The backing store is smaller than the reserved region
    OutOfBounds,
}

/// Error type for the device controller operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    UnknownMode,
    InvalidCredentials,
    /// The operation does not exist in the current device state
    NotAvailable,
    /// A restart is pending; nothing may change until it happens
    RestartPending,
    Persistence(PersistenceError),
}

impl From<PersistenceError> for DeviceError {
    fn from(error: PersistenceError) -> Self {
        DeviceError::Persistence(error)
    }
}

/// Error type for the wireless link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// The link did not come up within the allotted polls
    Timeout,
    /// The radio driver refused the request
    Driver,
}

/// Station side of the wireless link
#[allow(async_fn_in_trait)]
pub trait NetworkLink {
    /// Start associating with the given network.
    ///
    /// Returns once the request is accepted, not when the link is up.
    async fn begin(&mut self, credentials: &Credentials) -> Result<(), NetworkError>;

    /// Whether the link is currently up
    fn is_connected(&mut self) -> bool;

    /// Drop the association, if any
    async fn disconnect(&mut self);
}
