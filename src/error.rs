//! Error handling primitives for the KX134 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The identity registers did not match the expected KX134 constants.
    DeviceIdMismatch,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The requested output data rate has no register encoding.
    UnsupportedRate,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
