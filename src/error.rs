use thiserror::Error;

use crate::addrs::AddrError;
use crate::config::ConfigError;
use crate::registry::HostError;

/// Hard failures of the helper APIs. Block decoding never fails this way;
/// it reports problems as diagnostics instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    #[error("Address error: {0}")]
    Addr(#[from] AddrError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
