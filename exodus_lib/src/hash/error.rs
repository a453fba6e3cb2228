use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Password was hashed with Identity version {0}, only v2 (version byte 0) is supported")]
    UnsupportedVersion(u8),
    #[error("Password hash is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Password hash blob is {0} bytes long, expected at least 49")]
    TooShort(usize),
}
