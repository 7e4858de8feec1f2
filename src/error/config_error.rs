use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),
    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(String),
    #[error("Can't read config file: {0}")]
    Io(#[from] std::io::Error),
}
