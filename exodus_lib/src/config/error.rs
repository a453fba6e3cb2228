use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Environment variable {0} is not set")]
pub struct Error(pub &'static str);
