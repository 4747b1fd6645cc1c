use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("mandatory option(s) not defined: {0}")]
    MissingOptions(String),
    #[error("invalid value for option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
    #[error("no entries generated beneath {0}")]
    NoEntries(String),
    #[error("plugin state error: {0}")]
    State(&'static str),
}

impl Error {
    pub fn invalid_option(option: &str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}
