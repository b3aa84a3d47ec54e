use thiserror::Error;

/// Unrecoverable driver failure.
///
/// Every variant means the peripheral is missing or mapped wrongly. Callers
/// propagate it to the top of the program and terminate; nothing in this
/// crate retries after one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("PI address {address:#010x} out of range")]
    AddressOutOfRange { address: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
