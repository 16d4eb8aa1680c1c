use {
    banter_channels::ChannelError, banter_protocol::ValidationError,
    banter_providers::ProviderError, thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ChatError {
    /// HTTP-style status the failure maps to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Channel(ChannelError::EmptyMessage) => 400,
            Self::Channel(_) => 500,
            Self::Provider(e) if e.is_transient() => 503,
            Self::Provider(_) => 500,
        }
    }

    /// Wording for the public envelope. Validation failures name every bad
    /// field; everything else stays generic, with detail in the logs only.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => format!("Invalid request data: {}.", e.summary()),
            Self::Channel(ChannelError::EmptyMessage) => {
                "Invalid request data: message is empty.".into()
            },
            Self::Channel(_) => "Failed to deliver the response.".into(),
            Self::Provider(e) if e.is_transient() => {
                "Connection error while generating the response.".into()
            },
            Self::Provider(_) => "Failed to generate the response.".into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
