use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No surname found")]
    SurnameNotFound,

    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
