use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("system instruction file not found at {path}")]
    PersonaFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl banter_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

pub type ConfigError = Error;
pub type Result<T> = std::result::Result<T, Error>;

banter_common::impl_context!();
