use super::{
    models::{Message, MessageCreateData, MessageUpdateData},
    repository::MessageRepository,
    validation::{field_error, validate_message},
};
use crate::{
    errors::{ApiError, ErrorResponse, FieldErrors},
    http::DataResponse,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Outcome of a message mutation. Every operation produces exactly one
/// variant; the transport maps each to its response shape.
#[derive(Debug)]
pub enum MessageOutcome {
    Created(Message),
    Updated,
    Deleted,
    NotFound(String),
    ValidationError(FieldErrors),
    Conflict(String),
}

impl IntoResponse for MessageOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Created(msg) => DataResponse {
                message: Some("A message was created".to_string()),
                http_code: Some(StatusCode::CREATED),
                data: msg,
            }
            .into_response(),
            Self::Updated => DataResponse {
                message: Some("The message was updated".to_string()),
                http_code: Some(StatusCode::OK),
                data: (),
            }
            .into_response(),
            Self::Deleted => DataResponse {
                message: Some("The message was deleted".to_string()),
                http_code: Some(StatusCode::OK),
                data: (),
            }
            .into_response(),
            Self::NotFound(message) => {
                ErrorResponse::new(StatusCode::NOT_FOUND, 40402, message).into_response()
            }
            Self::Conflict(message) => {
                ErrorResponse::new(StatusCode::CONFLICT, 40901, message).into_response()
            }
            Self::ValidationError(errors) => ErrorResponse {
                status_code: StatusCode::BAD_REQUEST,
                error_code: 40001,
                message: "The message payload failed validation".to_string(),
                errors: Some(errors),
            }
            .into_response(),
        }
    }
}

/// Stateless orchestrator for message mutations. Holds no state of its own;
/// the repository is the sole source of truth.
pub struct MessageService<M: MessageRepository> {
    repo: M,
}

impl<M: MessageRepository> MessageService<M> {
    #[inline]
    pub fn new(repo: M) -> Self {
        Self { repo }
    }

    pub async fn get(&self, organization_id: Uuid, id: Uuid) -> Result<Option<Message>, ApiError> {
        self.repo.get_by_id(organization_id, id).await
    }

    pub async fn get_all(&self, organization_id: Uuid) -> Result<Vec<Message>, ApiError> {
        self.repo.get_all(organization_id).await
    }

    pub async fn create(
        &self,
        organization_id: Uuid,
        data: MessageCreateData,
    ) -> Result<MessageOutcome, ApiError> {
        let errors = validate_message(&data.title, &data.content);
        if !errors.is_empty() {
            return Ok(MessageOutcome::ValidationError(errors));
        }

        // The duplicate check matches inactive messages too: a title stays
        // taken even after the message holding it is retired.
        if self
            .repo
            .get_by_title(organization_id, &data.title)
            .await?
            .is_some()
        {
            return Ok(MessageOutcome::Conflict(conflict_message(&data.title)));
        }

        let msg = self.repo.create(organization_id, data).await?;

        Ok(MessageOutcome::Created(msg))
    }

    pub async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        data: MessageUpdateData,
    ) -> Result<MessageOutcome, ApiError> {
        let errors = validate_message(&data.title, &data.content);
        if !errors.is_empty() {
            return Ok(MessageOutcome::ValidationError(errors));
        }

        let mut msg = match self.repo.get_by_id(organization_id, id).await? {
            Some(v) => v,
            None => return Ok(MessageOutcome::NotFound(not_found_message(id))),
        };

        if !msg.active {
            return Ok(MessageOutcome::ValidationError(field_error(
                "active",
                "cannot update inactive messages",
            )));
        }

        // Keeping the current title collides with the message itself, which
        // is fine; only a different message holding it is a conflict.
        if let Some(existing) = self.repo.get_by_title(organization_id, &data.title).await? {
            if existing.id != id {
                return Ok(MessageOutcome::Conflict(conflict_message(&data.title)));
            }
        }

        msg.title = data.title;
        msg.content = data.content;
        msg.active = data.active;

        match self.repo.update(msg).await? {
            Some(_) => Ok(MessageOutcome::Updated),
            None => Ok(MessageOutcome::NotFound(not_found_message(id))),
        }
    }

    pub async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<MessageOutcome, ApiError> {
        let msg = match self.repo.get_by_id(organization_id, id).await? {
            Some(v) => v,
            None => return Ok(MessageOutcome::NotFound(not_found_message(id))),
        };

        if !msg.active {
            return Ok(MessageOutcome::ValidationError(field_error(
                "active",
                "cannot delete inactive messages",
            )));
        }

        if self.repo.delete(organization_id, id).await? {
            Ok(MessageOutcome::Deleted)
        } else {
            Ok(MessageOutcome::NotFound(not_found_message(id)))
        }
    }
}

fn conflict_message(title: &str) -> String {
    format!("A message titled \"{title}\" already exists")
}

fn not_found_message(id: Uuid) -> String {
    format!("No message with id \"{id}\" was found")
}
