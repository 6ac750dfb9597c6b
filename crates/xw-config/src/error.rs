//! Errors raised while loading xword settings.

/// Failure to build an [`XwConfig`](crate::XwConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A TOML file or `XWORD_*` variable could not be read into the settings.
    #[error("failed to read xword settings: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A setting was read but is out of range.
    #[error("setting '{field}' {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
