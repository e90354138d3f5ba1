use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("invalid ticket index {0}")]
    InvalidTicket(usize),
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store io: {0}")]
    Io(#[from] io::Error),
    #[error("preference store encoding: {0}")]
    Encode(String),
}
