//! Crate error type.
//!
//! There is deliberately no error taxonomy here: every failure a client call
//! can hit is a transport-layer or HTTP-status failure, and it is surfaced
//! verbatim from the HTTP stack. Callers decide what to show the user.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status attached to the failure, when one was received at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(err) => err.status(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
