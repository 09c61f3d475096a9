use crate::{
    errors::ApiError,
    http::{AppData, DataResponse, Json},
    message::{
        models::{Message, MessageCreateData, MessageUpdateData},
        repository::MessageRepository,
        service::{MessageOutcome, MessageService},
    },
};
use axum::extract::Path;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationIdPathParams {
    pub organization_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationIdMessageIdPathParams {
    pub organization_id: Uuid,
    pub message_id: Uuid,
}

pub async fn get_organization_id_messages<M>(
    AppData(data): AppData<MessageService<M>>,
    Path(path): Path<OrganizationIdPathParams>,
) -> Result<DataResponse<Vec<Message>>, ApiError>
where
    M: MessageRepository + 'static,
{
    let msgs = data.get_all(path.organization_id).await?;

    Ok(msgs.into())
}

pub async fn get_organization_id_message_id<M>(
    AppData(data): AppData<MessageService<M>>,
    Path(path): Path<OrganizationIdMessageIdPathParams>,
) -> Result<DataResponse<Message>, ApiError>
where
    M: MessageRepository + 'static,
{
    let msg = match data.get(path.organization_id, path.message_id).await? {
        Some(v) => v,
        None => return Err(ApiError::MessageNotFound),
    };

    Ok(msg.into())
}

pub async fn post_organization_id_message<M>(
    AppData(data): AppData<MessageService<M>>,
    Path(path): Path<OrganizationIdPathParams>,
    Json(body): Json<MessageCreateData>,
) -> Result<MessageOutcome, ApiError>
where
    M: MessageRepository + 'static,
{
    data.create(path.organization_id, body).await
}

pub async fn put_organization_id_message_id<M>(
    AppData(data): AppData<MessageService<M>>,
    Path(path): Path<OrganizationIdMessageIdPathParams>,
    Json(body): Json<MessageUpdateData>,
) -> Result<MessageOutcome, ApiError>
where
    M: MessageRepository + 'static,
{
    data.update(path.organization_id, path.message_id, body).await
}

pub async fn delete_organization_id_message_id<M>(
    AppData(data): AppData<MessageService<M>>,
    Path(path): Path<OrganizationIdMessageIdPathParams>,
) -> Result<MessageOutcome, ApiError>
where
    M: MessageRepository + 'static,
{
    data.delete(path.organization_id, path.message_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::memory_repository::InMemoryMessageRepository;
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
        routing, Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    type MemoryRepo = InMemoryMessageRepository;

    fn app() -> Router {
        Router::new()
            .route(
                "/organization/{organization_id}/messages",
                routing::get(get_organization_id_messages::<MemoryRepo>),
            )
            .route(
                "/organization/{organization_id}/message/{message_id}",
                routing::get(get_organization_id_message_id::<MemoryRepo>),
            )
            .route(
                "/organization/{organization_id}/message",
                routing::post(post_organization_id_message::<MemoryRepo>),
            )
            .route(
                "/organization/{organization_id}/message/{message_id}",
                routing::put(put_organization_id_message_id::<MemoryRepo>),
            )
            .route(
                "/organization/{organization_id}/message/{message_id}",
                routing::delete(delete_organization_id_message_id::<MemoryRepo>),
            )
            .layer(AppData::extension(MessageService::new(MemoryRepo::new())))
    }

    fn json_request(method: &str, uri: String, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(res: Response<Body>) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_get_delete_round_trip_maps_status_codes() {
        let app = app();
        let org = Uuid::new_v4();

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                format!("/organization/{org}/message"),
                json!({
                    "title": "Launch Notice",
                    "content": "Service launching next Monday."
                }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        assert_eq!(body["data"]["active"], json!(true));
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/organization/{org}/message/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/organization/{org}/message/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/organization/{org}/message/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_title_maps_to_conflict() {
        let app = app();
        let org = Uuid::new_v4();

        let body = json!({
            "title": "Launch Notice",
            "content": "Service launching next Monday."
        });

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                format!("/organization/{org}/message"),
                body.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                format!("/organization/{org}/message"),
                body,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_payload_maps_to_bad_request_with_field_errors() {
        let app = app();
        let org = Uuid::new_v4();

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                format!("/organization/{org}/message"),
                json!({ "title": "ab", "content": "short" }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = json_body(res).await;
        assert_eq!(
            body["errors"]["title"][0],
            json!("title must be between 3 and 200 characters")
        );
        assert_eq!(
            body["errors"]["content"][0],
            json!("content must be between 10 and 1000 characters")
        );
    }

    #[tokio::test]
    async fn update_on_unknown_message_maps_to_not_found() {
        let app = app();
        let org = Uuid::new_v4();
        let id = Uuid::new_v4();

        let res = app
            .clone()
            .oneshot(json_request(
                "PUT",
                format!("/organization/{org}/message/{id}"),
                json!({
                    "title": "Launch Notice",
                    "content": "Service launching next Monday.",
                    "active": true
                }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = json_body(res).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains(&id.to_string()));
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_organization() {
        let app = app();
        let org = Uuid::new_v4();
        let other_org = Uuid::new_v4();

        for (o, title) in [(org, "First"), (org, "Second"), (other_org, "Third")] {
            let res = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    format!("/organization/{o}/message"),
                    json!({ "title": title, "content": "Some message content." }),
                ))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/organization/{org}/messages"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);

        let body = json_body(res).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }
}
