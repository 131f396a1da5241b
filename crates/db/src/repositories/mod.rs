use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use msgstats_core::{Message, MessageFilter};

pub mod message;

pub use message::SqlMessageRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("message `{0}` already exists")]
    Duplicate(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All messages, in storage-default order.
    async fn list_all(&self) -> Result<Vec<Message>, RepositoryError>;

    /// Persist a new message, stamping the creation date. Fails with
    /// [`RepositoryError::Duplicate`] when the uuid is already taken.
    async fn create(&self, message: Message) -> Result<Message, RepositoryError>;

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Message>, RepositoryError>;

    /// Messages matching every active constraint of the filter.
    async fn find_filtered(&self, filter: &MessageFilter)
        -> Result<Vec<Message>, RepositoryError>;
}
