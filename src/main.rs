mod errors;
mod handlers;
mod http;
mod message;
mod setup;

#[cfg(feature = "postgres-repository")]
mod impls {
    pub type MessageRepo = crate::message::postgres_repository::PostgresMessageRepository;
}

#[cfg(not(feature = "postgres-repository"))]
mod impls {
    pub type MessageRepo = crate::message::memory_repository::InMemoryMessageRepository;
}

use crate::{
    http::AppData,
    impls::*,
    message::service::MessageService,
    setup::{env_param, JsonPanicHandler},
};
use axum::{routing, Router};
use std::{error::Error, net::SocketAddr};
use tower_http::{catch_panic::CatchPanicLayer, normalize_path::NormalizePathLayer};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

pub type BoxedError = Box<dyn Error + Send + Sync>;

pub const ENCODING_FAILED_BODY: &[u8] =
    br#"{"message":"Failed to encode the response body","error_code":50000}"#;

async fn body() -> Result<(), BoxedError> {
    #[cfg(feature = "dotenv")]
    dotenvy::dotenv().map_err(|_| crate::setup::VarError::DotenvFileNotFound)?;

    #[cfg(feature = "json-log")]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()?;

    #[cfg(not(feature = "json-log"))]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()?;

    let port = env_param("APP_PORT").unwrap_or(8080_u16);

    let mut app = Router::new();

    app = app
        .route(
            "/organization/{organization_id}/messages",
            routing::get(handlers::get_organization_id_messages::<MessageRepo>),
        )
        .route(
            "/organization/{organization_id}/message/{message_id}",
            routing::get(handlers::get_organization_id_message_id::<MessageRepo>),
        )
        .route(
            "/organization/{organization_id}/message",
            routing::post(handlers::post_organization_id_message::<MessageRepo>),
        )
        .route(
            "/organization/{organization_id}/message/{message_id}",
            routing::put(handlers::put_organization_id_message_id::<MessageRepo>),
        )
        .route(
            "/organization/{organization_id}/message/{message_id}",
            routing::patch(handlers::put_organization_id_message_id::<MessageRepo>),
        )
        .route(
            "/organization/{organization_id}/message/{message_id}",
            routing::delete(handlers::delete_organization_id_message_id::<MessageRepo>),
        );

    #[cfg(feature = "postgres-repository")]
    {
        use crate::message::postgres_repository::PostgresMessageRepository;

        let database_url = env_param::<String>("DATABASE_URL")?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect(&database_url)
            .await?;

        let message_repo = PostgresMessageRepository::new(pool);

        app = app.layer(AppData::extension(MessageService::new(message_repo)));
    }

    #[cfg(not(feature = "postgres-repository"))]
    {
        use crate::message::memory_repository::InMemoryMessageRepository;

        let message_repo = InMemoryMessageRepository::new();

        app = app.layer(AppData::extension(MessageService::new(message_repo)));
    }

    app = app
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(CatchPanicLayer::custom(JsonPanicHandler));

    #[cfg(feature = "http-trace")]
    {
        app = app.layer(tower_http::trace::TraceLayer::new_for_http());
    }
    #[cfg(feature = "http-cors")]
    {
        use crate::setup::setup_app_cors;
        app = setup_app_cors(app);
    }

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    tracing::info!(port, "Server listenning");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn main() -> Result<(), BoxedError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed building the Runtime")
        .block_on(body())
}
