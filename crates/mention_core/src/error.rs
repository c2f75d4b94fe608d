use layout::CaretError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse mention config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid mention config `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error(transparent)]
    Caret(#[from] CaretError),
    #[error("menu is closed")]
    Closed,
}
