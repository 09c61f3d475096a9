use super::{
    models::{Message, MessageCreateData},
    repository::MessageRepository,
};
use crate::errors::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct InMemoryMessageRepository(Arc<Mutex<HashMap<Uuid, Message>>>);

impl InMemoryMessageRepository {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn get_all(&self, organization_id: Uuid) -> Result<Vec<Message>, ApiError> {
        let lock = self.0.lock().await;

        let mut arr = lock
            .values()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect::<Vec<_>>();
        drop(lock);

        arr.sort_by_key(|m| m.created_at);

        Ok(arr)
    }

    async fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Message>, ApiError> {
        let lock = self.0.lock().await;
        let msg = lock
            .get(&id)
            .filter(|m| m.organization_id == organization_id)
            .cloned();
        drop(lock);

        Ok(msg)
    }

    async fn get_by_title(
        &self,
        organization_id: Uuid,
        title: &str,
    ) -> Result<Option<Message>, ApiError> {
        let lock = self.0.lock().await;

        for m in lock.values() {
            if m.organization_id == organization_id && m.title == title {
                return Ok(Some(m.clone()));
            }
        }
        drop(lock);

        Ok(None)
    }

    async fn create(
        &self,
        organization_id: Uuid,
        data: MessageCreateData,
    ) -> Result<Message, ApiError> {
        let now = Utc::now();

        let msg = Message {
            id: Uuid::new_v4(),
            organization_id,
            created_at: now,
            updated_at: now,
            title: data.title,
            content: data.content,
            active: true,
        };

        let mut lock = self.0.lock().await;
        lock.insert(msg.id, msg.clone());
        drop(lock);

        Ok(msg)
    }

    async fn update(&self, message: Message) -> Result<Option<Message>, ApiError> {
        let mut lock = self.0.lock().await;

        let stored = match lock
            .get(&message.id)
            .filter(|m| m.organization_id == message.organization_id)
        {
            Some(v) => v.clone(),
            None => return Ok(None),
        };

        let msg = Message {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..message
        };
        lock.insert(msg.id, msg.clone());
        drop(lock);

        Ok(Some(msg))
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let mut lock = self.0.lock().await;

        let found = match lock.get(&id) {
            Some(m) if m.organization_id == organization_id => true,
            _ => false,
        };
        if found {
            lock.remove(&id);
        }
        drop(lock);

        Ok(found)
    }
}
