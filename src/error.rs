use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The raw input is not decodable text. Fatal to a load.
    #[error("input is not valid UTF-8 text: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error("column '{column}' not found in CSV header")]
    MissingColumn { column: String },
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::Config { message: format!("TOML parsing error: {e}") }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
