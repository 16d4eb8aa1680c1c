use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    /// The normalized message came out empty — nothing to send to the model.
    #[error("message is empty after normalization")]
    EmptyMessage,

    #[error("{context}: {source}")]
    Delivery {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no recipient resolved for outbound message")]
    MissingRecipient,
}

impl ChannelError {
    #[must_use]
    pub fn delivery(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Delivery {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
