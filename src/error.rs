use thiserror::Error;

/// Failures reported by every text operation in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidEncoding { offset: usize },

    #[error("{0:?} is not a valid normalization form, options are: c, d, kc, or kd")]
    InvalidForm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
