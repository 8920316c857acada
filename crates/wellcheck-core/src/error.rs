use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("malformed email address: {0}")]
    MalformedEmail(String),

    #[error("email domain is not a recognised provider or institution: {0}")]
    UnrecognisedDomain(String),

    #[error("disposable email domains are not accepted: {0}")]
    DisposableDomain(String),

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
}
