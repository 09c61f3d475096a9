use super::models::{Message, MessageCreateData};
use crate::errors::ApiError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Sync + Send {
    async fn get_all(&self, organization_id: Uuid) -> Result<Vec<Message>, ApiError>;

    async fn get_by_id(&self, organization_id: Uuid, id: Uuid)
        -> Result<Option<Message>, ApiError>;

    async fn get_by_title(
        &self,
        organization_id: Uuid,
        title: &str,
    ) -> Result<Option<Message>, ApiError>;

    /// Persists a new message. The repository assigns the id and both
    /// timestamps; the message starts out active.
    async fn create(
        &self,
        organization_id: Uuid,
        data: MessageCreateData,
    ) -> Result<Message, ApiError>;

    /// Persists changes to an existing message and refreshes its
    /// `updated_at` timestamp. Returns `None` when the target no longer
    /// exists.
    async fn update(&self, message: Message) -> Result<Option<Message>, ApiError>;

    /// Returns `false` when no message with the given id exists.
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, ApiError>;
}
