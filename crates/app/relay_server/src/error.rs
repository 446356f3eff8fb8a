use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Relay: {}", .0)]
    Relay(#[from] relay_core::RelayError),

    #[error("Logging: {}", .0)]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
